//! Harvester error types

use arvest_core::FetchError;

/// Parse failure, either for one entry or for the whole feed
#[derive(Debug)]
pub enum ParseError {
    /// Feed body is not well-formed XML (fatal to the harvest)
    Xml(quick_xml::Error),
    /// Entry lacks a required element (entry is skipped)
    MissingField { field: &'static str },
    /// Required field is present but empty (entry is skipped)
    EmptyField { field: &'static str },
    /// `updated` does not match `YYYY-MM-DDTHH:MM:SSZ` (entry is skipped)
    InvalidTimestamp { value: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "malformed XML: {e}"),
            Self::MissingField { field } => write!(f, "missing <{field}> element"),
            Self::EmptyField { field } => write!(f, "empty {field}"),
            Self::InvalidTimestamp { value } => {
                write!(f, "invalid updated timestamp {value:?}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e)
    }
}

/// Harvest failure: the fetch or the feed parse failed
#[derive(Debug)]
pub enum HarvestError {
    Fetch(FetchError),
    Parse(ParseError),
}

impl std::fmt::Display for HarvestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "fetch failed: {e}"),
            Self::Parse(e) => write!(f, "parse failed: {e}"),
        }
    }
}

impl std::error::Error for HarvestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<FetchError> for HarvestError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

impl From<ParseError> for HarvestError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let e = ParseError::MissingField { field: "title" };
        assert_eq!(e.to_string(), "missing <title> element");
    }

    #[test]
    fn empty_field_display() {
        let e = ParseError::EmptyField { field: "id" };
        assert_eq!(e.to_string(), "empty id");
    }

    #[test]
    fn invalid_timestamp_display() {
        let e = ParseError::InvalidTimestamp {
            value: "2024-01-20".to_string(),
        };
        assert_eq!(e.to_string(), "invalid updated timestamp \"2024-01-20\"");
    }

    #[test]
    fn harvest_error_wraps_fetch() {
        let e = HarvestError::from(FetchError {
            status: Some(404),
            message: "not found".to_string(),
        });
        assert_eq!(e.to_string(), "fetch failed: HTTP 404: not found");
    }
}
