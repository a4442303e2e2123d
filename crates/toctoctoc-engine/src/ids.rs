//! Anchor identifiers for headings.

use crate::heading::Heading;

pub const DEFAULT_ID_PREFIX: &str = "headline-";

/// Supplies the anchor id a TOC entry links to.
pub trait IdentifierAssigner {
    /// Deterministic id for the heading at `index` in the processed sequence.
    fn generate(&self, index: usize) -> String;

    /// Return the heading's id, generating and storing one if it has none.
    /// Existing ids are never replaced; an empty id counts as none.
    fn ensure<'h>(&self, heading: &'h mut Heading, index: usize) -> &'h str {
        if heading.id.as_deref().is_none_or(str::is_empty) {
            heading.id = Some(self.generate(index));
        }
        heading.id.as_deref().unwrap_or_default()
    }
}

/// `<prefix><index>` ids, `headline-0`, `headline-1`, ... by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedIndexIds {
    prefix: String,
}

impl PrefixedIndexIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for PrefixedIndexIds {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdentifierAssigner for PrefixedIndexIds {
    fn generate(&self, index: usize) -> String {
        format!("{}{index}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::heading::HeadingLevel;

    fn heading(id: Option<&str>) -> Heading {
        let mut doc = Document::new();
        Heading {
            node: doc.create_element("h2"),
            level: HeadingLevel::new(2).unwrap(),
            text: "Title".to_string(),
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn keeps_existing_id() {
        let ids = PrefixedIndexIds::default();
        let mut h = heading(Some("intro"));

        assert_eq!(ids.ensure(&mut h, 3), "intro");
        assert_eq!(ids.ensure(&mut h, 7), "intro");
        assert_eq!(h.id.as_deref(), Some("intro"));
    }

    #[test]
    fn generates_from_index_once() {
        let ids = PrefixedIndexIds::default();
        let mut h = heading(None);

        assert_eq!(ids.ensure(&mut h, 4), "headline-4");
        // A second pass at another position must not rename it.
        assert_eq!(ids.ensure(&mut h, 9), "headline-4");
    }

    #[test]
    fn empty_id_is_replaced() {
        let ids = PrefixedIndexIds::default();
        let mut h = heading(Some(""));

        assert_eq!(ids.ensure(&mut h, 2), "headline-2");
        assert_eq!(h.id.as_deref(), Some("headline-2"));
    }

    #[test]
    fn custom_prefix() {
        let ids = PrefixedIndexIds::new("toc-");
        assert_eq!(ids.generate(0), "toc-0");
        assert_eq!(ids.prefix(), "toc-");
    }
}
