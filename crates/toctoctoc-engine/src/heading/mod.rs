//! # Headings
//!
//! - **`selector`**: `HeadlineSelector`, the tag matcher (default `h1..h8`)
//! - **`source`**: `collect_headings`, which finds matching elements in
//!   document order and snapshots them as [`Heading`]s

pub mod selector;
pub mod source;

pub use selector::HeadlineSelector;
pub use source::collect_headings;

use std::fmt;
use std::num::NonZeroU8;

use crate::dom::NodeId;
use crate::error::TocError;

/// Nesting level of a heading, derived from its tag (`h3` → 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingLevel(NonZeroU8);

impl HeadingLevel {
    pub fn new(level: u8) -> Option<Self> {
        NonZeroU8::new(level).map(Self)
    }

    /// Extract the level from a tag name of the form `h<digits>`.
    pub fn from_tag(tag: &str) -> Result<Self, TocError> {
        let malformed = || TocError::MalformedHeading {
            tag: tag.to_string(),
        };

        let digits = tag
            .strip_prefix('h')
            .or_else(|| tag.strip_prefix('H'))
            .ok_or_else(malformed)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(malformed)
    }

    pub fn get(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A matched heading element, as seen by the hierarchy builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// The heading element in the source document.
    pub node: NodeId,
    pub level: HeadingLevel,
    /// Text content of the heading element.
    pub text: String,
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("h1", 1)]
    #[case("h6", 6)]
    #[case("H2", 2)]
    #[case("h8", 8)]
    #[case("h10", 10)]
    fn parses_level_from_tag(#[case] tag: &str, #[case] expected: u8) {
        assert_eq!(HeadingLevel::from_tag(tag).unwrap().get(), expected);
    }

    #[rstest]
    #[case("h0")]
    #[case("h")]
    #[case("hx")]
    #[case("h-1")]
    #[case("div")]
    #[case("h999")]
    #[case("header")]
    fn rejects_tags_without_a_level(#[case] tag: &str) {
        assert_eq!(
            HeadingLevel::from_tag(tag),
            Err(TocError::MalformedHeading {
                tag: tag.to_string()
            })
        );
    }
}
