use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Flat;

/// Summary kept for every listing already handled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub title: String,
    pub district: String,
    pub street: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// Content hashes already handled, per applicant email.
///
/// Persisted as JSON: `{ email: { content_hash: entry } }`.
#[derive(Debug, Default)]
pub struct AppliedLedger {
    path: PathBuf,
    entries: BTreeMap<String, BTreeMap<String, LedgerEntry>>,
}

impl AppliedLedger {
    /// Open the ledger at `path`. A missing file yields an empty ledger.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Invalid ledger file {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No ledger at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        Ok(Self { path, entries })
    }

    /// Write a fresh ledger at `path` from `initial_json`, e.g. identities carried
    /// over from an earlier deployment. Invalid JSON seeds an empty ledger.
    pub async fn seed(path: impl Into<PathBuf>, initial_json: &str) -> Result<Self> {
        let path = path.into();

        let entries = serde_json::from_str(initial_json).unwrap_or_else(|err| {
            warn!("⚠️ Invalid initial ledger data ({}), using empty object", err);
            BTreeMap::new()
        });

        let ledger = Self { path, entries };
        ledger.save().await?;
        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, email: &str, content_hash: &str) -> bool {
        self.entries
            .get(email)
            .is_some_and(|hashes| hashes.contains_key(content_hash))
    }

    pub fn record(&mut self, email: &str, flat: &Flat) {
        let entry = LedgerEntry {
            title: flat.title().to_string(),
            district: flat.district().to_string(),
            street: flat.street().map(str::to_string),
            applied_at: Utc::now(),
        };
        self.entries
            .entry(email.to_string())
            .or_default()
            .insert(flat.content_hash().to_string(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
