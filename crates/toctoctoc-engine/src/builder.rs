//! # Hierarchy Builder
//!
//! Turns a flat, document-order run of headings into nested lists.
//!
//! One [`BuildPass`] walks the headings once, keeping a [`NestingStack`] of
//! insertion targets (root list first, innermost last):
//!
//! - deeper heading: open one nested list under the current item, however
//!   many levels were skipped,
//! - shallower heading: close `current - next` lists,
//! - same level: append a sibling.
//!
//! Closing more lists than are open is governed by [`AscentPolicy`].

use std::cmp::Ordering;

use crate::dom::{Document, NodeId};
use crate::error::TocError;
use crate::heading::{Heading, HeadingLevel};
use crate::ids::IdentifierAssigner;
use crate::render::{RenderStrategy, RenderedList};

/// What to do when a heading ascends past the root list, e.g. `h3` then `h1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AscentPolicy {
    /// Close everything down to the root list and continue there.
    #[default]
    ClampToRoot,
    /// Fail with [`TocError::StackUnderflow`] without touching the document.
    Reject,
}

/// Move between the previous heading level and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Descend,
    /// Close this many nested lists.
    Ascend(usize),
}

impl Transition {
    pub fn between(current: HeadingLevel, next: HeadingLevel) -> Self {
        match next.cmp(&current) {
            Ordering::Greater => Self::Descend,
            Ordering::Less => Self::Ascend(usize::from(current.get() - next.get())),
            Ordering::Equal => Self::Stay,
        }
    }
}

/// Open insertion targets, root to innermost. The root can never be popped.
#[derive(Debug, Clone)]
pub struct NestingStack {
    root: NodeId,
    nested: Vec<NodeId>,
}

impl NestingStack {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            nested: Vec::new(),
        }
    }

    pub fn push(&mut self, target: NodeId) {
        self.nested.push(target);
    }

    /// Where the next list item goes.
    pub fn top(&self) -> NodeId {
        self.nested.last().copied().unwrap_or(self.root)
    }

    /// Number of open lists, root included.
    pub fn depth(&self) -> usize {
        self.nested.len() + 1
    }

    /// Pop up to `n` targets, stopping at the root. Returns how many were popped.
    pub fn pop_towards_root(&mut self, n: usize) -> usize {
        let popped = n.min(self.nested.len());
        self.nested.truncate(self.nested.len() - popped);
        popped
    }
}

/// Builds the TOC list tree for a sequence of headings.
pub struct HierarchyBuilder<'a, R: RenderStrategy + ?Sized, I: IdentifierAssigner + ?Sized> {
    renderer: &'a R,
    ids: &'a I,
    policy: AscentPolicy,
}

impl<'a, R: RenderStrategy + ?Sized, I: IdentifierAssigner + ?Sized> HierarchyBuilder<'a, R, I> {
    pub fn new(renderer: &'a R, ids: &'a I) -> Self {
        Self {
            renderer,
            ids,
            policy: AscentPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AscentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the nested lists for `headings` and return the root container.
    ///
    /// Returns `Ok(None)` without touching the document when there are no
    /// headings. Headings lacking an id get one, both in `headings` and on
    /// their element. Ids are written and the root container is appended to
    /// `render_at` only once the whole pass has succeeded; on error
    /// `headings` and the reachable document are left as they were.
    pub fn build(
        &self,
        doc: &mut Document,
        headings: &mut [Heading],
        render_at: Option<NodeId>,
    ) -> Result<Option<NodeId>, TocError> {
        if headings.is_empty() {
            log::debug!("No headings matched, skipping table of contents");
            return Ok(None);
        }
        if let Some(target) = render_at
            && doc.element(target).is_none()
        {
            return Err(TocError::InvalidTarget(target));
        }
        check_ascents(headings, self.policy)?;

        let mut pass = BuildPass::open(doc, self.renderer, self.ids, self.policy)?;
        let outcome = pass.run(doc, headings).and_then(|()| match render_at {
            Some(target) => doc.append_child(target, pass.root.list),
            None => Ok(()),
        });
        if let Err(err) = outcome {
            pass.rollback(headings);
            return Err(err);
        }

        let root = pass.commit(doc);
        log::debug!("Built table of contents for {} headings", headings.len());
        Ok(Some(root.list))
    }
}

/// Replay the level transitions without rendering, so a rejected hierarchy
/// fails before any element is created or any id assigned.
fn check_ascents(headings: &[Heading], policy: AscentPolicy) -> Result<(), TocError> {
    if policy == AscentPolicy::ClampToRoot {
        return Ok(());
    }

    let mut depth = 1usize;
    let mut current: Option<HeadingLevel> = None;
    for (index, heading) in headings.iter().enumerate() {
        let from = *current.get_or_insert(heading.level);
        match Transition::between(from, heading.level) {
            Transition::Descend => depth += 1,
            Transition::Ascend(n) if n >= depth => {
                return Err(TocError::StackUnderflow {
                    index,
                    from: from.get(),
                    to: heading.level.get(),
                });
            }
            Transition::Ascend(n) => depth -= n,
            Transition::Stay => {}
        }
        current = Some(heading.level);
    }
    Ok(())
}

/// State of a single build: discarded once the root list is returned.
struct BuildPass<'a, R: RenderStrategy + ?Sized, I: IdentifierAssigner + ?Sized> {
    renderer: &'a R,
    ids: &'a I,
    policy: AscentPolicy,
    root: RenderedList,
    stack: NestingStack,
    current_level: Option<HeadingLevel>,
    current_item: Option<NodeId>,
    /// Ids to write onto heading elements on commit.
    pending_ids: Vec<(NodeId, String)>,
    /// Previous `id` of every heading this pass changed, for rollback.
    replaced: Vec<(usize, Option<String>)>,
}

impl<'a, R: RenderStrategy + ?Sized, I: IdentifierAssigner + ?Sized> BuildPass<'a, R, I> {
    fn open(
        doc: &mut Document,
        renderer: &'a R,
        ids: &'a I,
        policy: AscentPolicy,
    ) -> Result<Self, TocError> {
        let root = renderer.render_list(doc, 0)?;
        Ok(Self {
            renderer,
            ids,
            policy,
            root,
            stack: NestingStack::new(root.insertion_target),
            current_level: None,
            current_item: None,
            pending_ids: Vec::new(),
            replaced: Vec::new(),
        })
    }

    fn run(&mut self, doc: &mut Document, headings: &mut [Heading]) -> Result<(), TocError> {
        for (index, heading) in headings.iter_mut().enumerate() {
            self.push(doc, heading, index)?;
        }
        Ok(())
    }

    fn push(
        &mut self,
        doc: &mut Document,
        heading: &mut Heading,
        index: usize,
    ) -> Result<(), TocError> {
        let level = heading.level;
        // The first heading sets the baseline, so it never opens or closes a list.
        let current = *self.current_level.get_or_insert(level);

        let previous = heading.id.clone();
        match doc.id(heading.node).filter(|id| !id.is_empty()) {
            Some(existing) => {
                if heading.id.as_deref().is_none_or(str::is_empty) {
                    heading.id = Some(existing.to_string());
                }
            }
            None => {
                let id = self.ids.ensure(heading, index).to_string();
                self.pending_ids.push((heading.node, id));
            }
        }
        if heading.id != previous {
            self.replaced.push((index, previous));
        }

        let transition = Transition::between(current, level);
        log::debug!(
            "Heading {index} ({level}, {:?}): {transition:?} at depth {}",
            heading.text,
            self.stack.depth()
        );
        match transition {
            Transition::Descend => self.descend(doc, level)?,
            Transition::Ascend(n) => self.ascend(n, index, current, level)?,
            Transition::Stay => {}
        }

        self.current_level = Some(level);
        let item = self.add_list_item(doc)?;
        self.current_item = Some(item);

        let entry = self.renderer.render_entry(doc, heading)?;
        doc.append_child(item, entry)
    }

    fn descend(&mut self, doc: &mut Document, level: HeadingLevel) -> Result<(), TocError> {
        let parent = match self.current_item {
            Some(item) => item,
            None => {
                let item = self.add_list_item(doc)?;
                self.current_item = Some(item);
                item
            }
        };

        let list = self.renderer.render_list(doc, level.get())?;
        doc.append_child(parent, list.list)?;
        self.stack.push(list.insertion_target);
        Ok(())
    }

    fn ascend(
        &mut self,
        n: usize,
        index: usize,
        from: HeadingLevel,
        to: HeadingLevel,
    ) -> Result<(), TocError> {
        let popped = self.stack.pop_towards_root(n);
        if popped == n {
            return Ok(());
        }

        match self.policy {
            AscentPolicy::ClampToRoot => {
                log::warn!(
                    "Heading {index} ascends from {from} to {to} past the root list; clamped to root"
                );
                Ok(())
            }
            AscentPolicy::Reject => Err(TocError::StackUnderflow {
                index,
                from: from.get(),
                to: to.get(),
            }),
        }
    }

    fn add_list_item(&mut self, doc: &mut Document) -> Result<NodeId, TocError> {
        let item = self.renderer.render_list_item(doc)?;
        doc.append_child(self.stack.top(), item)?;
        Ok(item)
    }

    fn commit(self, doc: &mut Document) -> RenderedList {
        for (node, id) in self.pending_ids {
            doc.set_id(node, id);
        }
        self.root
    }

    /// Undo the ids handed out to `headings`. Nodes created so far stay in
    /// the arena but are unreachable.
    fn rollback(self, headings: &mut [Heading]) {
        for (index, previous) in self.replaced {
            headings[index].id = previous;
        }
    }
}
