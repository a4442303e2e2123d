use crate::dom::{Document, NodeId};
use crate::error::TocError;

use super::{Heading, HeadingLevel, HeadlineSelector};

/// Find every element below `scope` whose tag matches `selector`, in
/// document order.
///
/// Levels are parsed up front, so a malformed match fails the whole call
/// before anything downstream touches the document.
pub fn collect_headings(
    doc: &Document,
    scope: NodeId,
    selector: &HeadlineSelector,
) -> Result<Vec<Heading>, TocError> {
    if doc.element(scope).is_none() {
        return Err(TocError::InvalidScope(scope));
    }

    doc.descendants(scope)
        .filter_map(|node| {
            let tag = doc.tag(node)?;
            selector.matches(tag).then_some((node, tag))
        })
        .map(|(node, tag)| {
            Ok(Heading {
                node,
                level: HeadingLevel::from_tag(tag)?,
                text: doc.text_content(node),
                id: doc.id(node).filter(|id| !id.is_empty()).map(str::to_string),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(doc: &mut Document, parent: NodeId, tag: &str, text: &str) -> NodeId {
        let node = doc.create_element(tag);
        doc.append_text(node, text).unwrap();
        doc.append_child(parent, node).unwrap();
        node
    }

    #[test]
    fn collects_in_document_order_within_scope() {
        let mut doc = Document::new();
        let body = doc.body();
        heading(&mut doc, body, "h1", "Outside");
        let article = doc.create_element("article");
        doc.append_child(body, article).unwrap();
        let first = heading(&mut doc, article, "h2", "First");
        heading(&mut doc, article, "p", "Not a heading");
        let second = heading(&mut doc, article, "h3", "Second");
        doc.set_id(second, "second");

        let headings = collect_headings(&doc, article, &HeadlineSelector::default()).unwrap();

        assert_eq!(
            headings,
            vec![
                Heading {
                    node: first,
                    level: HeadingLevel::new(2).unwrap(),
                    text: "First".to_string(),
                    id: None,
                },
                Heading {
                    node: second,
                    level: HeadingLevel::new(3).unwrap(),
                    text: "Second".to_string(),
                    id: Some("second".to_string()),
                },
            ]
        );
    }

    #[test]
    fn empty_id_is_treated_as_missing() {
        let mut doc = Document::new();
        let body = doc.body();
        let node = heading(&mut doc, body, "h2", "Blank");
        doc.set_id(node, "");

        let headings = collect_headings(&doc, body, &HeadlineSelector::default()).unwrap();

        assert_eq!(headings[0].id, None);
    }

    #[test]
    fn respects_selector() {
        let mut doc = Document::new();
        let body = doc.body();
        heading(&mut doc, body, "h1", "Title");
        heading(&mut doc, body, "h2", "Section");

        let selector = HeadlineSelector::parse("h2").unwrap();
        let headings = collect_headings(&doc, body, &selector).unwrap();

        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Section");
    }

    #[test]
    fn selector_matching_non_heading_tag_is_malformed() {
        let mut doc = Document::new();
        let body = doc.body();
        heading(&mut doc, body, "h1", "Title");
        heading(&mut doc, body, "header", "Banner");

        let selector = HeadlineSelector::parse("h1, header").unwrap();
        let err = collect_headings(&doc, body, &selector).unwrap_err();

        assert_eq!(
            err,
            TocError::MalformedHeading {
                tag: "header".to_string()
            }
        );
    }

    #[test]
    fn text_scope_is_rejected() {
        let mut doc = Document::new();
        let text = doc.append_text(doc.body(), "loose").unwrap();

        let err = collect_headings(&doc, text, &HeadlineSelector::default()).unwrap_err();
        assert_eq!(err, TocError::InvalidScope(text));
    }
}
