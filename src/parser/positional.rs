use super::number::{is_digits, parse_german_decimal, parse_size, CURRENCY_MARKER};
use super::OptionalFields;

const ADDRESS_LINE: usize = 2;
const RENT_LINE: usize = 3;
const SIZE_LINE: usize = 5;
const ROOMS_LINE: usize = 7;

/// Read the optional fields from their fixed line positions.
pub(super) fn extract(lines: &[&str]) -> OptionalFields {
    let mut fields = OptionalFields::default();

    if let Some((street, rest)) = lines.get(ADDRESS_LINE).and_then(|line| line.rsplit_once(',')) {
        fields.street = Some(street.trim().to_string());

        let mut tokens = rest.split_whitespace().peekable();
        if tokens.peek().is_some_and(|token| token.len() == 5 && is_digits(token)) {
            fields.zip_code = tokens.next().map(str::to_string);
        }
        fields.city = Some(tokens.collect::<Vec<_>>().join(" "));
    }

    fields.total_rent = lines.get(RENT_LINE).and_then(|line| {
        let amount = line.split_once(CURRENCY_MARKER).map_or(*line, |(amount, _)| amount);
        parse_german_decimal(amount)
    });

    fields.size = lines.get(SIZE_LINE).and_then(|line| {
        parse_size(line).or_else(|| parse_german_decimal(line.trim_end_matches("m²")))
    });

    fields.rooms = lines.get(ROOMS_LINE).and_then(|line| {
        let digits: String = line.trim().chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    });

    fields
}
