/*!
This crate computes local explanations for predictions made by a trained binary decision tree. For a single example, the features the tree looks at on the way from the root to a leaf are credited with the decrease in impurity each split produced, and the credits are scaled to sum to one.

The tree can be a [`Tree`](struct.Tree.html) built from node arrays, or anything else that implements [`DecisionTree`](trait.DecisionTree.html).
*/

#![allow(clippy::tabs_in_doc_comments)]

mod explain;
mod types;

pub use self::explain::{decision_path, explain_tree, PathStep};
pub use self::types::{validate, BranchNode, DecisionTree, LeafNode, Node, Tree, LEAF};

use thiserror::Error;
use whitebox_util::NormalizeError;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
	#[error("the tree has no nodes")]
	Empty,
	#[error("expected {field} to have {expected} entries but it has {actual}")]
	LengthMismatch {
		field: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("node {node_index} has child {child_index} but the tree only has {n_nodes} nodes")]
	ChildOutOfRange {
		node_index: usize,
		child_index: usize,
		n_nodes: usize,
	},
	#[error("node {node_index} is reachable from the root more than once")]
	NotATree { node_index: usize },
	#[error("node {node_index} splits on feature {feature_index} but the example only has {n_features} features")]
	FeatureOutOfRange {
		node_index: usize,
		feature_index: usize,
		n_features: usize,
	},
	#[error(transparent)]
	Normalize(#[from] NormalizeError),
}
