use crate::dom::NodeId;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TocError {
    #[error("Scope node {0:?} does not belong to this document")]
    InvalidScope(NodeId),
    #[error("Target node {0:?} does not belong to this document")]
    InvalidTarget(NodeId),
    #[error("Invalid headline selector: {0:?}")]
    InvalidSelector(String),
    #[error("Generated heading ids need a non-empty prefix")]
    InvalidIdPrefix,
    #[error("Cannot determine heading level from tag <{tag}>")]
    MalformedHeading { tag: String },
    #[error(
        "Malformed heading hierarchy: heading {index} ascends from level {from} to {to} past the root list"
    )]
    StackUnderflow { index: usize, from: u8, to: u8 },
    #[error("Cannot append {child:?} to {parent:?}: {reason}")]
    InvalidAppend {
        parent: NodeId,
        child: NodeId,
        reason: &'static str,
    },
}
