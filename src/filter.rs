use serde::Serialize;

use crate::config::BotConfig;
use crate::models::Flat;

/// Why a listing was accepted or skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    Excluded(String),
    WbsRequired,
    RentTooHigh(f64),
    TooSmall(f64),
    TooFewRooms(u32),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// User criteria applied to parsed listings.
///
/// Unset optional fields never reject a listing.
#[derive(Debug, Clone)]
pub struct FlatFilter {
    exclude: Vec<String>,
    has_wbs: bool,
    rent_below: f64,
    size_above: f64,
    rooms_above: u32,
}

impl FlatFilter {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            exclude: config
                .exclude
                .iter()
                .map(|keyword| keyword.to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
            has_wbs: config.wbs,
            rent_below: config.flat_rent_below,
            size_above: config.flat_size_above,
            rooms_above: config.flat_rooms_above,
        }
    }

    pub fn evaluate(&self, flat: &Flat) -> Verdict {
        if let Some(keyword) = self.excluded_keyword(flat) {
            return Verdict::Excluded(keyword.to_string());
        }

        if flat.wbs() && !self.has_wbs {
            return Verdict::WbsRequired;
        }

        if let Some(rent) = flat.total_rent().filter(|rent| *rent >= self.rent_below) {
            return Verdict::RentTooHigh(rent);
        }

        if self.size_above > 0.0 {
            if let Some(size) = flat.size().filter(|size| *size <= self.size_above) {
                return Verdict::TooSmall(size);
            }
        }

        if self.rooms_above > 0 {
            if let Some(rooms) = flat.rooms().filter(|rooms| *rooms <= self.rooms_above) {
                return Verdict::TooFewRooms(rooms);
            }
        }

        Verdict::Accept
    }

    fn excluded_keyword(&self, flat: &Flat) -> Option<&str> {
        let haystack = [
            Some(flat.district()),
            Some(flat.title()),
            flat.street(),
            flat.city(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();

        self.exclude
            .iter()
            .find(|keyword| haystack.contains(keyword.as_str()))
            .map(String::as_str)
    }
}
