//! # Render Strategy
//!
//! The hierarchy builder never creates elements itself. It asks a
//! [`RenderStrategy`] for three things:
//!
//! - a list container (plus the node new items go into),
//! - an empty list item,
//! - the entry for one heading (a link by default).
//!
//! Every method has a default, so an implementation overrides only what it
//! needs. [`RenderCallbacks`] offers the same override points as closures.

use std::fmt;

use crate::dom::{Document, NodeId};
use crate::error::TocError;
use crate::heading::Heading;

pub const DEFAULT_LIST_CLASS: &str = "toc";

/// A freshly rendered list container.
///
/// `list` is what gets attached to the parent; `insertion_target` is where
/// list items are appended. They differ when the container wraps its list,
/// e.g. `<nav><ol>...</ol></nav>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedList {
    pub list: NodeId,
    pub insertion_target: NodeId,
}

impl RenderedList {
    /// A container that is its own insertion target.
    pub fn new(list: NodeId) -> Self {
        Self {
            list,
            insertion_target: list,
        }
    }

    pub fn with_insertion_target(list: NodeId, insertion_target: NodeId) -> Self {
        Self {
            list,
            insertion_target,
        }
    }
}

pub trait RenderStrategy {
    /// Render a list container. `indentation_level` is 0 for the root list
    /// and the opening heading's level for nested lists.
    fn render_list(
        &self,
        doc: &mut Document,
        indentation_level: u8,
    ) -> Result<RenderedList, TocError> {
        let _ = indentation_level;
        Ok(default_list(doc, DEFAULT_LIST_CLASS))
    }

    /// Render one detached list item.
    fn render_list_item(&self, doc: &mut Document) -> Result<NodeId, TocError> {
        Ok(default_list_item(doc))
    }

    /// Render the navigable entry for `heading`. The heading's id has been
    /// assigned by the time this is called.
    fn render_entry(&self, doc: &mut Document, heading: &Heading) -> Result<NodeId, TocError> {
        default_entry(doc, heading)
    }
}

/// `<ul class="{class}">`
pub fn default_list(doc: &mut Document, class: &str) -> RenderedList {
    let ul = doc.create_element("ul");
    doc.add_class(ul, class);
    RenderedList::new(ul)
}

/// `<li>`
pub fn default_list_item(doc: &mut Document) -> NodeId {
    doc.create_element("li")
}

/// `<a href="#{id}">{text}</a>`
pub fn default_entry(doc: &mut Document, heading: &Heading) -> Result<NodeId, TocError> {
    let a = doc.create_element("a");
    doc.set_attribute(a, "href", format!("#{}", heading.id.as_deref().unwrap_or_default()));
    doc.append_text(a, heading.text.as_str())?;
    Ok(a)
}

/// The built-in strategy, with a configurable list class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRenderer {
    list_class: String,
}

impl DefaultRenderer {
    pub fn new(list_class: impl Into<String>) -> Self {
        Self {
            list_class: list_class.into(),
        }
    }
}

impl Default for DefaultRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_CLASS)
    }
}

impl RenderStrategy for DefaultRenderer {
    fn render_list(
        &self,
        doc: &mut Document,
        _indentation_level: u8,
    ) -> Result<RenderedList, TocError> {
        Ok(default_list(doc, &self.list_class))
    }
}

type ListFn = dyn Fn(&mut Document, u8) -> Result<RenderedList, TocError>;
type ItemFn = dyn Fn(&mut Document) -> Result<NodeId, TocError>;
type EntryFn = dyn Fn(&mut Document, &Heading) -> Result<NodeId, TocError>;

/// Closure-based overrides. Each unset callback falls back to the wrapped
/// [`DefaultRenderer`] on its own.
#[derive(Default)]
pub struct RenderCallbacks {
    fallback: DefaultRenderer,
    list: Option<Box<ListFn>>,
    item: Option<Box<ItemFn>>,
    entry: Option<Box<EntryFn>>,
}

impl RenderCallbacks {
    pub fn set_fallback(&mut self, fallback: DefaultRenderer) {
        self.fallback = fallback;
    }

    pub fn with_list<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document, u8) -> Result<RenderedList, TocError> + 'static,
    {
        self.list = Some(Box::new(f));
        self
    }

    pub fn with_list_item<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document) -> Result<NodeId, TocError> + 'static,
    {
        self.item = Some(Box::new(f));
        self
    }

    pub fn with_entry<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document, &Heading) -> Result<NodeId, TocError> + 'static,
    {
        self.entry = Some(Box::new(f));
        self
    }
}

impl RenderStrategy for RenderCallbacks {
    fn render_list(
        &self,
        doc: &mut Document,
        indentation_level: u8,
    ) -> Result<RenderedList, TocError> {
        match &self.list {
            Some(f) => f(doc, indentation_level),
            None => self.fallback.render_list(doc, indentation_level),
        }
    }

    fn render_list_item(&self, doc: &mut Document) -> Result<NodeId, TocError> {
        match &self.item {
            Some(f) => f(doc),
            None => self.fallback.render_list_item(doc),
        }
    }

    fn render_entry(&self, doc: &mut Document, heading: &Heading) -> Result<NodeId, TocError> {
        match &self.entry {
            Some(f) => f(doc, heading),
            None => self.fallback.render_entry(doc, heading),
        }
    }
}

impl fmt::Debug for RenderCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCallbacks")
            .field("fallback", &self.fallback)
            .field("list", &self.list.is_some())
            .field("item", &self.item.is_some())
            .field("entry", &self.entry.is_some())
            .finish()
    }
}
