use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use super::traits::Notifier;
use super::{or_na, BOT_VERSION};
use crate::models::{ApplicationStatus, Flat, StatusLevel};

const GREEN: u32 = 0x00ff00;
const RED: u32 = 0xff0000;
const BLUE: u32 = 0x0099ff;
const ORANGE: u32 = 0xffaa00;

/// Webhook request body
#[derive(Debug, Serialize)]
pub(crate) struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbedFooter {
    pub text: String,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline,
        }
    }
}

/// Sends embeds to a Discord webhook
pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
    delay: Duration,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
            delay: Duration::from_secs(1),
        })
    }

    /// Pause after each send to stay under Discord's rate limits
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn send(&self, embed: Embed) -> Result<()> {
        let payload = WebhookPayload {
            embeds: vec![embed],
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .context("Failed to reach Discord webhook")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Discord webhook returned status: {}", status);
        }
        debug!("Discord webhook accepted message ({})", status);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}

pub(crate) fn application_embed(flat: &Flat, email: &str, status: ApplicationStatus) -> Embed {
    let (title, description, color, status_field) = match status {
        ApplicationStatus::Matched => (
            "🔎 New Matching Apartment Found",
            format!("Matched for email: {email}"),
            BLUE,
            EmbedField::new("🔎 Status", "Listing Matched", false),
        ),
        ApplicationStatus::Applied => (
            "🎉 Successfully Applied to Apartment!",
            format!("Applied with email: {email}"),
            GREEN,
            EmbedField::new("✅ Status", "Application Submitted", false),
        ),
        ApplicationStatus::Failed => (
            "❌ Failed to Apply to Apartment",
            format!("Attempted with email: {email}"),
            RED,
            EmbedField::new("❌ Status", "Application Failed", false),
        ),
    };

    let fields = vec![
        status_field,
        EmbedField::new("🏠 Title", flat.title(), false),
        EmbedField::new(
            "📍 Location",
            format!("{}, {}", flat.district(), or_na(flat.street())),
            true,
        ),
        EmbedField::new(
            "🏙️ Address",
            format!("{} {}", or_na(flat.zip_code()), or_na(flat.city())),
            true,
        ),
        EmbedField::new(
            "💰 Total Rent",
            or_na(flat.total_rent().map(|rent| format!("{rent:.2} €"))),
            true,
        ),
        EmbedField::new("📏 Size", or_na(flat.size().map(|size| format!("{size} m²"))), true),
        EmbedField::new("🚪 Rooms", or_na(flat.rooms()), true),
        EmbedField::new("🎫 WBS Required", if flat.wbs() { "Yes" } else { "No" }, true),
    ];

    Embed {
        title: title.to_string(),
        description,
        color,
        fields,
        timestamp: Utc::now().to_rfc3339(),
        footer: footer(),
    }
}

pub(crate) fn status_embed(message: &str, level: StatusLevel) -> Embed {
    let (emoji, color) = match level {
        StatusLevel::Info => ("ℹ️", BLUE),
        StatusLevel::Warning => ("⚠️", ORANGE),
        StatusLevel::Error => ("❌", RED),
        StatusLevel::Success => ("✅", GREEN),
    };

    Embed {
        title: format!("{emoji} Bot Status Update"),
        description: message.to_string(),
        color,
        fields: Vec::new(),
        timestamp: Utc::now().to_rfc3339(),
        footer: footer(),
    }
}

fn footer() -> EmbedFooter {
    EmbedFooter {
        text: format!("WBM Scout v{BOT_VERSION}"),
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify_application(
        &self,
        flat: &Flat,
        email: &str,
        status: ApplicationStatus,
    ) -> Result<()> {
        self.send(application_embed(flat, email, status)).await?;
        info!("Discord notification sent successfully ✅");
        Ok(())
    }

    async fn status_update(&self, message: &str, level: StatusLevel) -> Result<()> {
        self.send(status_embed(message, level)).await
    }

    fn channel_name(&self) -> &'static str {
        "Discord"
    }
}
