use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info, warn};

use super::or_na;
use super::traits::Notifier;
use crate::models::{ApplicationStatus, Flat, StatusLevel};

/// Writes notifications to the tracing log. Used when no webhook is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_application(
        &self,
        flat: &Flat,
        email: &str,
        status: ApplicationStatus,
    ) -> Result<()> {
        let summary = format!(
            "{} | {}, {} | {} {} | rent {} | {} m² | {} rooms | WBS {}",
            flat.title(),
            flat.district(),
            or_na(flat.street()),
            or_na(flat.zip_code()),
            or_na(flat.city()),
            or_na(flat.total_rent()),
            or_na(flat.size()),
            or_na(flat.rooms()),
            if flat.wbs() { "yes" } else { "no" },
        );

        match status {
            ApplicationStatus::Matched => info!("🔎 Match for {}: {}", email, summary),
            ApplicationStatus::Applied => info!("🎉 Applied with {}: {}", email, summary),
            ApplicationStatus::Failed => warn!("❌ Application failed for {}: {}", email, summary),
        }
        Ok(())
    }

    async fn status_update(&self, message: &str, level: StatusLevel) -> Result<()> {
        match level {
            StatusLevel::Info | StatusLevel::Success => info!("{}", message),
            StatusLevel::Warning => warn!("{}", message),
            StatusLevel::Error => error!("{}", message),
        }
        Ok(())
    }

    fn channel_name(&self) -> &'static str {
        "log"
    }
}
