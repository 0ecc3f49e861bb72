use super::number::{
    find_zip, is_digits, is_room_marker, parse_inline_rooms, parse_rent, parse_size,
    CURRENCY_MARKER, SIZE_RE,
};
use super::OptionalFields;

/// Address parts found on a single line
struct Address {
    street: String,
    zip_code: String,
    city: String,
}

/// Scan the lines after district and title.
///
/// Each line feeds at most one field, checked in the order rent, size,
/// address, rooms. A later matching line overwrites an earlier one.
pub(super) fn extract(lines: &[&str]) -> OptionalFields {
    let mut fields = OptionalFields::default();

    for (idx, line) in lines.iter().enumerate() {
        if line.contains(CURRENCY_MARKER) {
            if let Some(rent) = parse_rent(line) {
                fields.total_rent = Some(rent);
            }
            continue;
        }

        if SIZE_RE.is_match(line) {
            if let Some(size) = parse_size(line) {
                fields.size = Some(size);
            }
            continue;
        }

        if let Some(address) = parse_address(line) {
            fields.street = Some(address.street);
            fields.zip_code = Some(address.zip_code);
            fields.city = Some(address.city);
            continue;
        }

        if let Some(rooms) = parse_rooms(line, lines.get(idx + 1).copied()) {
            fields.rooms = Some(rooms);
        }
    }

    fields
}

/// `<street>, <zip> <city>` split on the first comma. The zip must follow the comma.
fn parse_address(line: &str) -> Option<Address> {
    let (street, rest) = line.split_once(',')?;
    let zip = find_zip(rest)?;
    let city = format!("{}{}", &rest[..zip.start], &rest[zip.end..]);

    Some(Address {
        street: street.trim().to_string(),
        zip_code: rest[zip].to_string(),
        city: city.trim().to_string(),
    })
}

fn parse_rooms(line: &str, next: Option<&str>) -> Option<u32> {
    let trimmed = line.trim();
    if is_digits(trimmed) {
        let marker_follows = next.is_some_and(is_room_marker);
        return if marker_follows {
            trimmed.parse().ok()
        } else {
            None
        };
    }
    parse_inline_rooms(line)
}
