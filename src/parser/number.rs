use once_cell::sync::Lazy;
use regex::Regex;

pub(super) const CURRENCY_MARKER: char = '€';
const ROOM_MARKER: &str = "Zimmer";

const STATIC_REGEX: &str = "Static regex pattern is guaranteed to be valid";

/// Exactly five digits, not part of a longer number
static ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{5})(?:[^0-9]|$)").expect(STATIC_REGEX));

/// German formatted area, thousands separators included
pub(super) static SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9][0-9.]*(?:,[0-9]+)?)\s*m²").expect(STATIC_REGEX)
});

static ROOMS_INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+).*zimmer").expect(STATIC_REGEX));

/// Parse a German formatted amount such as `1.234,50`.
///
/// Periods are thousands separators and are dropped; the comma becomes the
/// decimal point.
pub(super) fn parse_german_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Amount in front of the currency marker
pub(super) fn parse_rent(line: &str) -> Option<f64> {
    let (amount, _) = line.split_once(CURRENCY_MARKER)?;
    parse_german_decimal(amount)
}

/// First `<number> m²` in the line, read like an amount
pub(super) fn parse_size(line: &str) -> Option<f64> {
    let number = SIZE_RE.captures(line)?.get(1)?.as_str();
    parse_german_decimal(number)
}

/// Byte range of the standalone 5-digit zip code in `text`
pub(super) fn find_zip(text: &str) -> Option<std::ops::Range<usize>> {
    Some(ZIP_RE.captures(text)?.get(1)?.range())
}

/// Room marker, compared case-insensitively
pub(super) fn is_room_marker(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case(ROOM_MARKER)
}

pub(super) fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Leading digit run of a line that mentions the room marker
pub(super) fn parse_inline_rooms(line: &str) -> Option<u32> {
    ROOMS_INLINE_RE.captures(line)?.get(1)?.as_str().parse().ok()
}
