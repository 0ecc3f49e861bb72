use crate::models::{ApplicationStatus, Flat, StatusLevel};
use anyhow::Result;
use async_trait::async_trait;

/// Delivery channel for listing outcomes and run status.
///
/// Passed into the pipeline so callers decide where messages go.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Report the outcome for one listing and applicant email
    async fn notify_application(
        &self,
        flat: &Flat,
        email: &str,
        status: ApplicationStatus,
    ) -> Result<()>;

    /// Free-form status message
    async fn status_update(&self, message: &str, level: StatusLevel) -> Result<()>;

    fn channel_name(&self) -> &'static str;
}
