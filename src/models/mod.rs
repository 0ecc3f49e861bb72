use serde::{Deserialize, Serialize};

use crate::error::FlatError;
use crate::parser::{FlatParser, LineFormat};

/// One listing, parsed from the raw text block scraped off the offers page.
///
/// Optional fields stay `None` when no matching line was found; they serialize
/// as `null`, which keeps them apart from an empty `city`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flat {
    pub(crate) district: String,
    pub(crate) title: String,
    pub(crate) street: Option<String>,
    pub(crate) zip_code: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) total_rent: Option<f64>,
    pub(crate) size: Option<f64>,
    pub(crate) rooms: Option<u32>,
    pub(crate) wbs: bool,
    pub(crate) content_hash: String,
}

impl Flat {
    /// Parse a raw block with the pattern-scan format.
    pub fn parse(raw: &str, preserve_blank_lines: bool) -> Result<Self, FlatError> {
        FlatParser::new(LineFormat::PatternScan)
            .preserve_blank_lines(preserve_blank_lines)
            .parse(raw)
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn zip_code(&self) -> Option<&str> {
        self.zip_code.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Total rent in euros
    pub fn total_rent(&self) -> Option<f64> {
        self.total_rent
    }

    /// Living area in square meters
    pub fn size(&self) -> Option<f64> {
        self.size
    }

    pub fn rooms(&self) -> Option<u32> {
        self.rooms
    }

    /// Whether the listing requires a Wohnberechtigungsschein
    pub fn wbs(&self) -> bool {
        self.wbs
    }

    /// Hex SHA-256 of the raw block, used as the listing identity across runs
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

/// Outcome reported for a matching listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Listing passed the filter; no application was attempted
    Matched,
    Applied,
    Failed,
}

/// Severity of a free-form status update
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
    Success,
}
