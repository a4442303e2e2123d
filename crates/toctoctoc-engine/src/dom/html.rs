//! Serialization of element trees: HTML output plus two plain-text views.
//!
//! All walks keep their own stack, so nesting depth is bounded by memory
//! rather than by the thread's call stack.

use super::{Document, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];
const LIST_ELEMENTS: &[&str] = &["ul", "ol"];

enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

/// Serialize `node` and its subtree as HTML.
pub fn to_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![Step::Enter(node)];

    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Enter(node) => node,
            Step::Leave(node) => {
                if let Some(tag) = doc.tag(node) {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
                continue;
            }
        };

        match doc.kind(node) {
            Some(NodeKind::Text(text)) => out.push_str(&html_escape::encode_text(text)),
            Some(NodeKind::Element(el)) => {
                out.push('<');
                out.push_str(&el.tag);
                if let Some(id) = &el.id {
                    push_attribute(&mut out, "id", id);
                }
                if !el.classes.is_empty() {
                    push_attribute(&mut out, "class", &el.classes.join(" "));
                }
                for (name, value) in &el.attributes {
                    push_attribute(&mut out, name, value);
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    continue;
                }
                stack.push(Step::Leave(node));
                stack.extend(doc.children(node).iter().rev().map(|&c| Step::Enter(c)));
            }
            None => {}
        }
    }
    out
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(value));
    out.push('"');
}

/// Indented structural dump of a subtree, one node per line.
///
/// ```text
/// ul.toc
///   li
///     a[href=#intro]
///       "Intro"
/// ```
pub fn to_tree(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![(node, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        match doc.kind(node) {
            Some(NodeKind::Text(text)) => {
                out.push_str(&format!("{indent}{text:?}\n"));
            }
            Some(NodeKind::Element(el)) => {
                out.push_str(&indent);
                out.push_str(&el.tag);
                if let Some(id) = &el.id {
                    out.push('#');
                    out.push_str(id);
                }
                for class in &el.classes {
                    out.push('.');
                    out.push_str(class);
                }
                for (name, value) in &el.attributes {
                    out.push_str(&format!("[{name}={value}]"));
                }
                out.push('\n');
                stack.extend(doc.children(node).iter().rev().map(|&c| (c, depth + 1)));
            }
            None => {}
        }
    }
    out
}

/// Render a generated list as a Markdown-style bullet outline.
///
/// Every `li` becomes one bullet labelled with its own text (nested lists
/// excluded); nesting follows the `li` ancestry rather than the exact
/// element shape, so custom containers still render sensibly.
pub fn to_outline(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    let mut stack: Vec<(NodeId, usize)> = doc.child_elements(node).map(|c| (c, 0)).collect();
    stack.reverse();

    while let Some((node, depth)) = stack.pop() {
        let child_depth = if doc.tag(node) == Some("li") {
            let label = item_label(doc, node);
            out.push_str(&format!("{}- {}\n", "  ".repeat(depth), label.trim()));
            depth + 1
        } else {
            depth
        };
        let first_child = stack.len();
        stack.extend(doc.child_elements(node).map(|c| (c, child_depth)));
        stack[first_child..].reverse();
    }
    out
}

/// Text of `item`, skipping anything inside nested lists.
fn item_label(doc: &Document, item: NodeId) -> String {
    let mut label = String::new();
    let mut stack: Vec<NodeId> = doc.children(item).iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        match doc.kind(node) {
            Some(NodeKind::Text(text)) => label.push_str(text),
            Some(NodeKind::Element(el)) if !LIST_ELEMENTS.contains(&el.tag.as_str()) => {
                stack.extend(doc.children(node).iter().rev().copied());
            }
            _ => {}
        }
    }
    label
}
