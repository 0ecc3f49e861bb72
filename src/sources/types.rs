use std::path::PathBuf;

/// Line separating blocks in a plain-text dump
pub const BLOCK_DELIMITER: &str = "---";

/// CSS selector of one listing on the WBM offers page
pub const DEFAULT_LISTING_SELECTOR: &str = "div.openimmo-search-list-item";

/// Where an offers page is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLocation {
    File(PathBuf),
    Url(String),
}

impl PageLocation {
    /// `http(s)://` becomes a URL, `file://` and anything else a local path
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::Url(input.to_string())
        } else {
            let path = input.strip_prefix("file://").unwrap_or(input);
            Self::File(PathBuf::from(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_inputs() {
        assert_eq!(
            PageLocation::parse("https://www.wbm.de/wohnungen-berlin/angebote/"),
            PageLocation::Url("https://www.wbm.de/wohnungen-berlin/angebote/".into())
        );
        assert_eq!(
            PageLocation::parse("file:///home/test-data/angebote.html"),
            PageLocation::File("/home/test-data/angebote.html".into())
        );
        assert_eq!(
            PageLocation::parse("dump.txt"),
            PageLocation::File("dump.txt".into())
        );
    }
}
