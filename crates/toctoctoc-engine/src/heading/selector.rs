use std::fmt;
use std::str::FromStr;

use crate::error::TocError;

/// Which element tags count as headlines.
///
/// Parsed from a comma-separated tag list such as `"h1, h2, h3"`. Matching
/// is by tag name and ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineSelector {
    tags: Vec<String>,
}

impl HeadlineSelector {
    pub fn parse(selector: &str) -> Result<Self, TocError> {
        let tags: Vec<String> = selector
            .split(',')
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if tags.is_empty() {
            return Err(TocError::InvalidSelector(selector.to_string()));
        }
        if let Some(bad) = tags
            .iter()
            .find(|t| !t.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'))
        {
            return Err(TocError::InvalidSelector(bad.clone()));
        }

        Ok(Self { tags })
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Default for HeadlineSelector {
    /// `h1` through `h8`.
    fn default() -> Self {
        Self {
            tags: (1..=8).map(|n| format!("h{n}")).collect(),
        }
    }
}

impl FromStr for HeadlineSelector {
    type Err = TocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HeadlineSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_h1_to_h8() {
        let selector = HeadlineSelector::default();
        assert!(selector.matches("h1"));
        assert!(selector.matches("H8"));
        assert!(!selector.matches("h9"));
        assert!(!selector.matches("p"));
        assert_eq!(selector.to_string(), "h1, h2, h3, h4, h5, h6, h7, h8");
    }

    #[test]
    fn parses_comma_separated_list() {
        let selector: HeadlineSelector = " h2 ,H3,, ".parse().unwrap();
        assert_eq!(selector.tags(), ["h2", "h3"]);
        assert!(selector.matches("h3"));
        assert!(!selector.matches("h1"));
    }

    #[test]
    fn rejects_empty_selector() {
        assert!(matches!(
            HeadlineSelector::parse(" , "),
            Err(TocError::InvalidSelector(_))
        ));
    }

    #[test]
    fn rejects_css_combinators() {
        assert_eq!(
            HeadlineSelector::parse("h1, main > h2"),
            Err(TocError::InvalidSelector("main > h2".to_string()))
        );
    }
}
