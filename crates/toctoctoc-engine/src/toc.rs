//! # Table of Contents
//!
//! [`Toctoctoc`] ties the pieces together: find the headings under a scope,
//! make sure each one has an anchor id, and append the nested lists to a
//! target element.
//!
//! ```
//! use toctoctoc_engine::{Toctoctoc, TocOptions, parse_markdown, to_html};
//!
//! let mut doc = parse_markdown("# Intro\n\n## Usage\n").unwrap();
//! let nav = doc.create_element("nav");
//! doc.append_child(doc.body(), nav).unwrap();
//!
//! let toc = Toctoctoc::new(TocOptions::new(nav)).unwrap();
//! toc.generate(&mut doc).unwrap();
//!
//! assert_eq!(
//!     to_html(&doc, nav),
//!     r##"<nav><ul class="toc"><li><a href="#headline-0">Intro</a><ul class="toc"><li><a href="#headline-1">Usage</a></li></ul></li></ul></nav>"##
//! );
//! ```

use std::fmt;

use crate::builder::{AscentPolicy, HierarchyBuilder};
use crate::dom::{Document, NodeId};
use crate::error::TocError;
use crate::heading::{Heading, HeadlineSelector, collect_headings};
use crate::ids::{DEFAULT_ID_PREFIX, PrefixedIndexIds};
use crate::render::{
    DEFAULT_LIST_CLASS, DefaultRenderer, RenderCallbacks, RenderStrategy, RenderedList,
};

/// Everything a [`Toctoctoc`] can be configured with.
pub struct TocOptions {
    /// Element the generated list is appended to.
    pub elem: NodeId,
    /// Root to search for headings; the document body when unset.
    pub scope: Option<NodeId>,
    pub headline_selector: HeadlineSelector,
    pub id_prefix: String,
    pub list_class: String,
    pub ascent_policy: AscentPolicy,
    renderer: Option<Box<dyn RenderStrategy>>,
    callbacks: RenderCallbacks,
}

impl TocOptions {
    pub fn new(elem: NodeId) -> Self {
        Self {
            elem,
            scope: None,
            headline_selector: HeadlineSelector::default(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            list_class: DEFAULT_LIST_CLASS.to_string(),
            ascent_policy: AscentPolicy::default(),
            renderer: None,
            callbacks: RenderCallbacks::default(),
        }
    }

    pub fn scope(mut self, scope: NodeId) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn headline_selector(mut self, selector: HeadlineSelector) -> Self {
        self.headline_selector = selector;
        self
    }

    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn list_class(mut self, class: impl Into<String>) -> Self {
        self.list_class = class.into();
        self
    }

    pub fn ascent_policy(mut self, policy: AscentPolicy) -> Self {
        self.ascent_policy = policy;
        self
    }

    /// Replace the whole render strategy. Callbacks set with the
    /// `render_*` methods are ignored when a strategy is supplied.
    pub fn renderer(mut self, renderer: impl RenderStrategy + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn render_list<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document, u8) -> Result<RenderedList, TocError> + 'static,
    {
        self.callbacks = self.callbacks.with_list(f);
        self
    }

    pub fn render_list_item<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document) -> Result<NodeId, TocError> + 'static,
    {
        self.callbacks = self.callbacks.with_list_item(f);
        self
    }

    pub fn render_list_entry<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Document, &Heading) -> Result<NodeId, TocError> + 'static,
    {
        self.callbacks = self.callbacks.with_entry(f);
        self
    }
}

impl fmt::Debug for TocOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TocOptions")
            .field("elem", &self.elem)
            .field("scope", &self.scope)
            .field("headline_selector", &self.headline_selector)
            .field("id_prefix", &self.id_prefix)
            .field("list_class", &self.list_class)
            .field("ascent_policy", &self.ascent_policy)
            .field("custom_renderer", &self.renderer.is_some())
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

/// A configured table-of-contents generator.
pub struct Toctoctoc {
    elem: NodeId,
    scope: Option<NodeId>,
    selector: HeadlineSelector,
    ids: PrefixedIndexIds,
    policy: AscentPolicy,
    renderer: Box<dyn RenderStrategy>,
}

impl Toctoctoc {
    pub fn new(options: TocOptions) -> Result<Self, TocError> {
        if options.id_prefix.is_empty() {
            return Err(TocError::InvalidIdPrefix);
        }

        let renderer: Box<dyn RenderStrategy> = match options.renderer {
            Some(renderer) => renderer,
            None => {
                let mut callbacks = options.callbacks;
                callbacks.set_fallback(DefaultRenderer::new(options.list_class));
                Box::new(callbacks)
            }
        };

        Ok(Self {
            elem: options.elem,
            scope: options.scope,
            selector: options.headline_selector,
            ids: PrefixedIndexIds::new(options.id_prefix),
            policy: options.ascent_policy,
            renderer,
        })
    }

    /// Configure and generate in one step, the way a one-off caller wants it.
    pub fn run(doc: &mut Document, options: TocOptions) -> Result<Option<NodeId>, TocError> {
        Self::new(options)?.generate(doc)
    }

    /// Build the table of contents into `doc`.
    ///
    /// Returns the root list, or `None` when the scope holds no headings (in
    /// which case `doc` is left untouched).
    pub fn generate(&self, doc: &mut Document) -> Result<Option<NodeId>, TocError> {
        let scope = self.scope.unwrap_or_else(|| doc.body());
        if doc.element(scope).is_none() {
            return Err(TocError::InvalidScope(scope));
        }
        if doc.element(self.elem).is_none() {
            return Err(TocError::InvalidTarget(self.elem));
        }

        let mut headings = collect_headings(doc, scope, &self.selector)?;
        log::debug!(
            "Found {} headings matching '{}'",
            headings.len(),
            self.selector
        );

        HierarchyBuilder::new(self.renderer.as_ref(), &self.ids)
            .with_policy(self.policy)
            .build(doc, &mut headings, Some(self.elem))
    }
}

impl fmt::Debug for Toctoctoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toctoctoc")
            .field("elem", &self.elem)
            .field("scope", &self.scope)
            .field("selector", &self.selector)
            .field("ids", &self.ids)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
