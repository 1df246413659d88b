//! Book genre labels.
//!
//! The catalog uses a small closed set of categories. Each genre serializes
//! as its display label so the JSON matches what the storefront shows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Book category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Technology,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Mystery,
    History,
    #[serde(rename = "Self-Help")]
    SelfHelp,
}

/// Unknown genre label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre: {0}")]
pub struct GenreParseError(pub String);

impl Genre {
    /// Every genre, in display order.
    pub const ALL: [Self; 6] = [
        Self::Technology,
        Self::ScienceFiction,
        Self::Fantasy,
        Self::Mystery,
        Self::History,
        Self::SelfHelp,
    ];

    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::ScienceFiction => "Science Fiction",
            Self::Fantasy => "Fantasy",
            Self::Mystery => "Mystery",
            Self::History => "History",
            Self::SelfHelp => "Self-Help",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = GenreParseError;

    /// Case-insensitive match on the label. Dashes and spaces are
    /// interchangeable so `science-fiction` and `self help` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|genre| normalize(genre.label()) == wanted)
            .ok_or_else(|| GenreParseError(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        for genre in Genre::ALL {
            assert_eq!(genre.label().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!("fantasy".parse::<Genre>().unwrap(), Genre::Fantasy);
        assert_eq!(
            "science-fiction".parse::<Genre>().unwrap(),
            Genre::ScienceFiction
        );
        assert_eq!("SELF_HELP".parse::<Genre>().unwrap(), Genre::SelfHelp);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Poetry".parse::<Genre>().unwrap_err();
        assert_eq!(err.to_string(), "unknown genre: Poetry");
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Genre::ScienceFiction).unwrap();
        assert_eq!(json, "\"Science Fiction\"");
    }
}
