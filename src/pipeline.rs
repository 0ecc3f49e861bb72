use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::BotConfig;
use crate::filter::{FlatFilter, Verdict};
use crate::ledger::AppliedLedger;
use crate::models::{ApplicationStatus, Flat, StatusLevel};
use crate::notify::Notifier;
use crate::parser::FlatParser;
use crate::sources::ListingSource;

/// Submits an application for a listing. Success marks it as applied.
#[async_trait]
pub trait Applicant: Send + Sync {
    async fn apply(&self, flat: &Flat, email: &str) -> Result<()>;
}

/// Listing skipped by the filter
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub content_hash: String,
    pub title: String,
    pub verdict: Verdict,
}

/// Listing that passed the filter for one email
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub email: String,
    pub status: ApplicationStatus,
    pub flat: Flat,
}

/// Counts and outcomes of one pass over a source
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunReport {
    pub parsed: usize,
    pub malformed: usize,
    pub already_applied: usize,
    /// Ledger writes that failed; those listings may be reported again next run
    pub ledger_save_failures: usize,
    pub rejected: Vec<Rejection>,
    pub matched: Vec<MatchOutcome>,
}

/// Source → parser → filter → ledger → applicant → notifier
pub struct Pipeline {
    parser: FlatParser,
    filter: FlatFilter,
    emails: Vec<String>,
    ledger: AppliedLedger,
    notifier: Arc<dyn Notifier>,
    applicant: Option<Arc<dyn Applicant>>,
}

impl Pipeline {
    pub fn new(
        config: &BotConfig,
        parser: FlatParser,
        ledger: AppliedLedger,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            parser,
            filter: FlatFilter::from_config(config),
            emails: config.emails.clone(),
            ledger,
            notifier,
            applicant: None,
        }
    }

    pub fn with_applicant(mut self, applicant: Arc<dyn Applicant>) -> Self {
        self.applicant = Some(applicant);
        self
    }

    pub fn ledger(&self) -> &AppliedLedger {
        &self.ledger
    }

    pub async fn run(&mut self, source: &dyn ListingSource) -> Result<RunReport> {
        let blocks = source
            .fetch_blocks()
            .await
            .with_context(|| format!("Failed to fetch listings from {}", source.source_name()))?;
        info!("Processing {} listings from {}", blocks.len(), source.source_name());

        let mut report = RunReport::default();

        for block in &blocks {
            let flat = match self.parser.parse(block) {
                Ok(flat) => flat,
                Err(err) => {
                    warn!("Skipping listing: {}", err);
                    report.malformed += 1;
                    continue;
                }
            };
            report.parsed += 1;

            let verdict = self.filter.evaluate(&flat);
            if !verdict.is_accept() {
                debug!("Skipping {}: {:?}", flat.title(), verdict);
                report.rejected.push(Rejection {
                    content_hash: flat.content_hash().to_string(),
                    title: flat.title().to_string(),
                    verdict,
                });
                continue;
            }

            for email in &self.emails {
                if self.ledger.contains(email, flat.content_hash()) {
                    debug!("Already handled {} for {}", flat.title(), email);
                    report.already_applied += 1;
                    continue;
                }

                let status = self.submit(&flat, email).await;
                if let Err(err) = self.notifier.notify_application(&flat, email, status).await {
                    warn!("Failed to send {} notification: {:#}", self.notifier.channel_name(), err);
                }

                if status != ApplicationStatus::Failed {
                    self.ledger.record(email, &flat);
                    if let Err(err) = self.ledger.save().await {
                        warn!("Failed to save ledger {}: {:#}", self.ledger.path().display(), err);
                        report.ledger_save_failures += 1;
                    }
                }

                report.matched.push(MatchOutcome {
                    email: email.clone(),
                    status,
                    flat: flat.clone(),
                });
            }
        }

        if !report.matched.is_empty() {
            let message = format!(
                "Checked {} listings, {} new matches",
                report.parsed,
                report.matched.len()
            );
            if let Err(err) = self.notifier.status_update(&message, StatusLevel::Info).await {
                warn!("Failed to send {} status update: {:#}", self.notifier.channel_name(), err);
            }
        }

        info!(
            "✅ Parsed {}, malformed {}, rejected {}, already handled {}, matched {}",
            report.parsed,
            report.malformed,
            report.rejected.len(),
            report.already_applied,
            report.matched.len()
        );
        Ok(report)
    }

    async fn submit(&self, flat: &Flat, email: &str) -> ApplicationStatus {
        let Some(applicant) = &self.applicant else {
            return ApplicationStatus::Matched;
        };

        match applicant.apply(flat, email).await {
            Ok(()) => ApplicationStatus::Applied,
            Err(err) => {
                warn!("Application for {} with {} failed: {:#}", flat.title(), email, err);
                ApplicationStatus::Failed
            }
        }
    }
}
