//! Markdown ingestion: turns Markdown text into an element tree the heading
//! source can search.
//!
//! Only structure is kept: block and inline elements, text, link targets and
//! heading attributes (`# Title {#id .class}`). Raw HTML is carried over as
//! text.

use pulldown_cmark::{Event, HeadingLevel as MdHeadingLevel, Options, Parser, Tag};

use crate::dom::{Document, NodeId};
use crate::error::TocError;

/// Parse Markdown into a [`Document`] whose body holds the converted content.
pub fn parse_markdown(content: &str) -> Result<Document, TocError> {
    let options = Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let mut processor = MarkdownProcessor::new();
    for event in Parser::new_ext(content, options) {
        processor.process_event(event)?;
    }
    Ok(processor.finish())
}

/// Keeps the chain of open elements while pulldown-cmark streams events.
///
/// Every `Start` pushes a new element under the current one and every `End`
/// pops it, so `open` always mirrors the parser's nesting.
struct MarkdownProcessor {
    doc: Document,
    open: Vec<NodeId>,
}

impl MarkdownProcessor {
    fn new() -> Self {
        let doc = Document::new();
        let body = doc.body();
        Self {
            doc,
            open: vec![body],
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or_else(|| self.doc.body())
    }

    fn process_event(&mut self, event: Event<'_>) -> Result<(), TocError> {
        match event {
            Event::Start(tag) => self.start(tag)?,
            Event::End(_) => {
                // Never pop the body.
                if self.open.len() > 1 {
                    self.open.pop();
                }
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                self.doc.append_text(self.current(), text.as_ref())?;
            }
            Event::Code(code) => {
                let el = self.doc.create_element("code");
                self.doc.append_text(el, code.as_ref())?;
                self.doc.append_child(self.current(), el)?;
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                let el = self.doc.create_element("math");
                self.doc.append_text(el, math.as_ref())?;
                self.doc.append_child(self.current(), el)?;
            }
            Event::SoftBreak => {
                self.doc.append_text(self.current(), " ")?;
            }
            Event::HardBreak => self.append_empty("br")?,
            Event::Rule => self.append_empty("hr")?,
            Event::FootnoteReference(name) => {
                let sup = self.doc.create_element("sup");
                self.doc.append_text(sup, name.as_ref())?;
                self.doc.append_child(self.current(), sup)?;
            }
            Event::TaskListMarker(checked) => {
                let input = self.doc.create_element("input");
                self.doc.set_attribute(input, "type", "checkbox");
                if checked {
                    self.doc.set_attribute(input, "checked", "");
                }
                self.doc.append_child(self.current(), input)?;
            }
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) -> Result<(), TocError> {
        let el = match tag {
            Tag::Heading {
                level,
                id,
                classes,
                attrs,
            } => {
                let el = self.doc.create_element(heading_tag(level));
                if let Some(id) = id {
                    self.doc.set_id(el, id.as_ref());
                }
                for class in classes {
                    self.doc.add_class(el, class.as_ref());
                }
                for (name, value) in attrs {
                    self.doc
                        .set_attribute(el, name.as_ref(), value.as_deref().unwrap_or_default());
                }
                el
            }
            Tag::Link {
                dest_url, title, ..
            } => {
                let el = self.doc.create_element("a");
                self.doc.set_attribute(el, "href", dest_url.as_ref());
                if !title.is_empty() {
                    self.doc.set_attribute(el, "title", title.as_ref());
                }
                el
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let el = self.doc.create_element("img");
                self.doc.set_attribute(el, "src", dest_url.as_ref());
                if !title.is_empty() {
                    self.doc.set_attribute(el, "title", title.as_ref());
                }
                el
            }
            Tag::List(Some(start)) => {
                let el = self.doc.create_element("ol");
                if start != 1 {
                    self.doc.set_attribute(el, "start", start.to_string());
                }
                el
            }
            Tag::FootnoteDefinition(name) => {
                let el = self.doc.create_element("div");
                self.doc.add_class(el, "footnote");
                self.doc.set_id(el, name.as_ref());
                el
            }
            other => self.doc.create_element(element_tag(&other)),
        };

        self.doc.append_child(self.current(), el)?;
        self.open.push(el);
        Ok(())
    }

    fn append_empty(&mut self, tag: &str) -> Result<(), TocError> {
        let el = self.doc.create_element(tag);
        self.doc.append_child(self.current(), el)
    }

    fn finish(self) -> Document {
        self.doc
    }
}

fn heading_tag(level: MdHeadingLevel) -> String {
    format!("h{}", level as u8)
}

fn element_tag(tag: &Tag<'_>) -> &'static str {
    match tag {
        Tag::Paragraph => "p",
        Tag::BlockQuote(_) => "blockquote",
        Tag::CodeBlock(_) => "pre",
        Tag::List(None) => "ul",
        Tag::List(Some(_)) => "ol",
        Tag::Item => "li",
        Tag::Emphasis => "em",
        Tag::Strong => "strong",
        Tag::Strikethrough => "del",
        Tag::Table(_) => "table",
        Tag::TableHead => "thead",
        Tag::TableRow => "tr",
        Tag::TableCell => "td",
        _ => "div",
    }
}
