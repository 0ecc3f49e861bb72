//! Field extraction for raw listing blocks.
//!
//! A raw block is the visible text of one listing element, one value per line,
//! starting with the district and the title. Everything after those two lines
//! is optional and located either by pattern ([`LineFormat::PatternScan`]) or
//! by fixed position ([`LineFormat::StrictPositional`]).

mod number;
mod positional;
mod scan;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::FlatError;
use crate::models::Flat;

/// Case-insensitive marker for listings that require a WBS
const WBS_TOKEN: &str = "wbs";

/// Layout of the lines following district and title
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LineFormat {
    /// Every line is matched against the field patterns, last match wins
    #[default]
    PatternScan,
    /// Address, rent, size and rooms sit at lines 2, 3, 5 and 7
    StrictPositional,
}

/// Optional fields collected by a line format
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct OptionalFields {
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub total_rent: Option<f64>,
    pub size: Option<f64>,
    pub rooms: Option<u32>,
}

/// Turns raw listing blocks into [`Flat`] records.
///
/// Stateless and `Copy`; one parser can be shared across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatParser {
    format: LineFormat,
    preserve_blank_lines: bool,
}

impl FlatParser {
    pub fn new(format: LineFormat) -> Self {
        Self {
            format,
            preserve_blank_lines: false,
        }
    }

    /// Keep empty lines when indexing. Only useful to inspect the raw scrape shape.
    pub fn preserve_blank_lines(mut self, preserve: bool) -> Self {
        self.preserve_blank_lines = preserve;
        self
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    pub fn parse(&self, raw: &str) -> Result<Flat, FlatError> {
        let content_hash = content_hash(raw);
        let lines = split_lines(raw, self.preserve_blank_lines);

        let usable_lines = lines.iter().filter(|line| !line.trim().is_empty()).count();
        if usable_lines < 2 {
            return Err(FlatError::MalformedInput { usable_lines });
        }

        let district = lines[0].to_string();
        let title = lines[1].to_string();

        let fields = match self.format {
            LineFormat::PatternScan => scan::extract(&lines[2..]),
            LineFormat::StrictPositional => positional::extract(&lines),
        };

        let wbs = contains_wbs(&title) || contains_wbs(raw);

        Ok(Flat {
            district,
            title,
            street: fields.street,
            zip_code: fields.zip_code,
            city: fields.city,
            total_rent: fields.total_rent,
            size: fields.size,
            rooms: fields.rooms,
            wbs,
            content_hash,
        })
    }
}

/// Hex SHA-256 over the untouched block text.
pub fn content_hash(raw: &str) -> String {
    format!("{:x}", Sha256::digest(raw.as_bytes()))
}

fn split_lines(raw: &str, preserve_blank_lines: bool) -> Vec<&str> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| preserve_blank_lines || !line.trim().is_empty())
        .collect()
}

fn contains_wbs(text: &str) -> bool {
    text.to_lowercase().contains(WBS_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BLOCK: &str = "Mitte\nNice 2-Room Flat\nExamplestr. 5, 10115 Berlin\n850,00€\nKaltmiete\n65,5 m²\nWohnfläche\n2\nZimmer";

    #[test]
    fn parses_full_record() {
        let flat = Flat::parse(FULL_BLOCK, false).unwrap();

        assert_eq!(flat.district(), "Mitte");
        assert_eq!(flat.title(), "Nice 2-Room Flat");
        assert_eq!(flat.street(), Some("Examplestr. 5"));
        assert_eq!(flat.zip_code(), Some("10115"));
        assert_eq!(flat.city(), Some("Berlin"));
        assert_eq!(flat.total_rent(), Some(850.0));
        assert_eq!(flat.size(), Some(65.5));
        assert_eq!(flat.rooms(), Some(2));
        assert!(!flat.wbs());
    }

    #[test]
    fn two_lines_leave_optional_fields_unset() {
        let flat = Flat::parse("Pankow\nStudio", false).unwrap();

        assert_eq!(flat.district(), "Pankow");
        assert_eq!(flat.title(), "Studio");
        assert_eq!(flat.street(), None);
        assert_eq!(flat.zip_code(), None);
        assert_eq!(flat.city(), None);
        assert_eq!(flat.total_rent(), None);
        assert_eq!(flat.size(), None);
        assert_eq!(flat.rooms(), None);
    }

    #[test]
    fn fewer_than_two_lines_is_malformed() {
        for raw in ["", "\n\n  \n", "Pankow", "\nPankow\n\n"] {
            let err = Flat::parse(raw, false).unwrap_err();
            assert!(matches!(err, FlatError::MalformedInput { .. }), "{raw:?}");
        }
    }

    #[test]
    fn preserved_blank_lines_still_need_two_usable_lines() {
        let err = Flat::parse("Pankow\n\n", true).unwrap_err();
        assert_eq!(err, FlatError::MalformedInput { usable_lines: 1 });
    }

    #[test]
    fn hash_ignores_blank_line_mode() {
        let raw = "Mitte\n\nLoft\n\n900,00€\n";
        let stripped = Flat::parse(raw, false).unwrap();
        let preserved = Flat::parse(raw, true).unwrap();

        assert_eq!(stripped.content_hash(), preserved.content_hash());
        assert_eq!(stripped.content_hash(), content_hash(raw));
    }

    #[test]
    fn hash_changes_with_whitespace() {
        let a = Flat::parse("Mitte\nLoft", false).unwrap();
        let b = Flat::parse("Mitte\nLoft\n", false).unwrap();
        let c = Flat::parse("Mitte\nLoft", false).unwrap();

        assert_ne!(a.content_hash(), b.content_hash());
        assert_eq!(a, c);
    }

    #[test]
    fn known_digest() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn wbs_detected_in_title_or_body() {
        let in_title = Flat::parse("Spandau\nWohnung mit wBs\n???", false).unwrap();
        let in_body = Flat::parse("Spandau\nWohnung\nnur mit WBS 140", false).unwrap();
        let none = Flat::parse("Spandau\nWohnung\n700,00€", false).unwrap();

        assert!(in_title.wbs());
        assert!(in_body.wbs());
        assert!(!none.wbs());
    }

    #[test]
    fn carriage_returns_are_not_part_of_fields() {
        let flat = Flat::parse("Mitte\r\nLoft\r\n700,00€\r\n", false).unwrap();

        assert_eq!(flat.district(), "Mitte");
        assert_eq!(flat.title(), "Loft");
        assert_eq!(flat.total_rent(), Some(700.0));
    }

    #[test]
    fn parser_format_is_selectable() {
        let parser = FlatParser::new(LineFormat::StrictPositional);
        assert_eq!(parser.format(), LineFormat::StrictPositional);
        assert_eq!(FlatParser::default().format(), LineFormat::PatternScan);
    }
}
