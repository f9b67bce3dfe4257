use thiserror::Error;

use super::NodeId;

/// Fatal layout failures. Always reported before any node is placed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("the tree has no root node")]
    MissingRoot,

    #[error("child {index} of node {parent:?} is null")]
    NullChild { parent: String, index: usize },

    #[error("node {label:?} was sized {width}x{height}; both dimensions must be positive")]
    InvalidSize {
        label: String,
        width: f32,
        height: f32,
    },

    #[error("config field `{field}` = {value} {reason}")]
    Config {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Degraded-output conditions. The layout is still returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutWarning {
    /// `node`'s subtree reaches into the gap reserved before its next
    /// sibling `next` by `overlap` units after correction.
    #[error(
        "subtree of node {} overlaps the gap before node {} by {overlap:.2}",
        .node.index(),
        .next.index()
    )]
    UnresolvedOverlap {
        node: NodeId,
        next: NodeId,
        overlap: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_names_both_siblings() {
        let warning = LayoutWarning::UnresolvedOverlap {
            node: NodeId(3005),
            next: NodeId(3006),
            overlap: 75.0,
        };
        assert_eq!(
            warning.to_string(),
            "subtree of node 3005 overlaps the gap before node 3006 by 75.00"
        );
    }

    #[test]
    fn invalid_input_converts_into_layout_error() {
        let err: LayoutError = InvalidInput::MissingRoot.into();
        assert_eq!(err.to_string(), "invalid input: the tree has no root node");
    }
}
