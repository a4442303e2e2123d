//! # toctoctoc-engine
//!
//! Builds a nested table of contents from the headings of a document.
//!
//! ## Pipeline
//!
//! ```text
//! Markdown → parse_markdown → Document → collect_headings → HierarchyBuilder
//!            (pulldown-cmark)             (HeadlineSelector)  (RenderStrategy,
//!                                                              IdentifierAssigner)
//!                                                                    ↓
//!                                                              nested lists
//! ```
//!
//! ## Modules
//!
//! - **`dom`**: arena element tree plus HTML / outline serialization
//! - **`heading`**: heading levels, the headline selector and the heading source
//! - **`ids`**: anchor id assignment for headings without one
//! - **`render`**: the pluggable `RenderStrategy` and its defaults
//! - **`builder`**: the nesting-stack walk that produces the list tree
//! - **`toc`**: `Toctoctoc`, the configured entry point
//! - **`markdown`**: Markdown ingestion

pub mod builder;
pub mod dom;
pub mod error;
pub mod heading;
pub mod ids;
pub mod markdown;
pub mod render;
pub mod toc;

// Re-export key types for easier usage
pub use builder::{AscentPolicy, HierarchyBuilder, NestingStack, Transition};
pub use dom::html::{to_html, to_outline, to_tree};
pub use dom::{Document, Element, NodeId, NodeKind};
pub use error::TocError;
pub use heading::{Heading, HeadingLevel, HeadlineSelector, collect_headings};
pub use ids::{IdentifierAssigner, PrefixedIndexIds};
pub use markdown::parse_markdown;
pub use render::{DefaultRenderer, RenderCallbacks, RenderStrategy, RenderedList};
pub use toc::{TocOptions, Toctoctoc};
