use anyhow::Result;
use async_trait::async_trait;

/// Supplier of raw listing blocks, one string per listing.
///
/// Blocks are returned exactly as extracted so their content hash stays stable.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_blocks(&self) -> Result<Vec<String>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
