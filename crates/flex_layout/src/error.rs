//! Contract violations reported by tree mutation and layout entry points.

use indextree::{NodeError, NodeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("node {child:?} already has an owner; remove it first")]
    ChildAlreadyOwned { child: NodeId },
    #[error("node {node:?} has a measure function and cannot have children")]
    MeasuredNodeCannotHaveChildren { node: NodeId },
    #[error("node {node:?} has children and cannot take a measure function")]
    NodeHasChildren { node: NodeId },
    #[error("cannot reset node {node:?} while it still has children")]
    ResetWithChildren { node: NodeId },
    #[error("cannot reset node {node:?} while it is still attached to an owner")]
    ResetWithOwner { node: NodeId },
    #[error("layout must start at a root; node {node:?} has an owner")]
    NotARoot { node: NodeId },
    #[error("root node {node:?} has a measure function")]
    RootHasMeasureFunc { node: NodeId },
    #[error("owner {axis} must be finite when given, got {value}")]
    NonFiniteOwnerSize { axis: &'static str, value: f64 },
    #[error("child index {index} out of bounds for node {node:?} with {count} children")]
    ChildIndexOutOfBounds { node: NodeId, index: usize, count: usize },
    #[error("node {child:?} is not a child of {owner:?}")]
    NotAChild { owner: NodeId, child: NodeId },
    #[error("invalid tree edit: {0}")]
    Structure(#[from] NodeError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
