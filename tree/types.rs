/*!
This module contains the trained decision tree types that explanations are computed for.
*/

use crate::Error;

/// The child index stored for both children of a leaf built with `Node::Leaf`.
pub const LEAF: usize = usize::MAX;

/// A trained binary decision tree, seen through its per-node arrays. Node 0 is the root. A node is a leaf if and only if its left and right children are equal.
pub trait DecisionTree {
	fn n_nodes(&self) -> usize;
	fn children_left(&self, node_index: usize) -> usize;
	fn children_right(&self, node_index: usize) -> usize;
	/// The index of the feature a branch node splits on.
	fn feature(&self, node_index: usize) -> usize;
	/// Examples whose feature value is <= the threshold go to the left child. All others go to the right.
	fn threshold(&self, node_index: usize) -> f32;
	/// Impurities are read as `f32`. Trees trained with `f64` impurities are narrowed, so explanations carry `f32` precision.
	fn impurity(&self, node_index: usize) -> f32;

	fn is_leaf(&self, node_index: usize) -> bool {
		self.children_left(node_index) == self.children_right(node_index)
	}
}

/// A `Tree` stores a trained binary decision tree as parallel arrays indexed by node.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
	children_left: Vec<usize>,
	children_right: Vec<usize>,
	feature: Vec<usize>,
	threshold: Vec<f32>,
	impurity: Vec<f32>,
}

/** A Node is used to build a `Tree` one node at a time. It has two types:
1. **Branch**: A `BranchNode` represents internal tree nodes.
2. **Leaf**:  A `LeafNode` represents terminal nodes.
*/
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
	Branch(BranchNode),
	Leaf(LeafNode),
}

/// A BranchNode describes an internal node in a trained tree.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchNode {
	/// The index in the tree's node arrays for this node's left child.
	pub left_child_index: usize,
	/// The index in the tree's node arrays for this node's right child.
	pub right_child_index: usize,
	/// The index of the feature used to split the node.
	pub feature_index: usize,
	/// All feature values <= split_value go to the left subtree and all others go to the right.
	pub split_value: f32,
	pub impurity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeafNode {
	pub impurity: f32,
}

impl Tree {
	/// Create a tree from its node arrays. All five arrays must have one entry per node, and the nodes reachable from the root must form a binary tree.
	pub fn new(
		children_left: Vec<usize>,
		children_right: Vec<usize>,
		feature: Vec<usize>,
		threshold: Vec<f32>,
		impurity: Vec<f32>,
	) -> Result<Self, Error> {
		let n_nodes = children_left.len();
		check_len("children_right", n_nodes, children_right.len())?;
		check_len("feature", n_nodes, feature.len())?;
		check_len("threshold", n_nodes, threshold.len())?;
		check_len("impurity", n_nodes, impurity.len())?;
		let tree = Self {
			children_left,
			children_right,
			feature,
			threshold,
			impurity,
		};
		validate(&tree)?;
		Ok(tree)
	}

	pub fn from_nodes(nodes: &[Node]) -> Result<Self, Error> {
		let n_nodes = nodes.len();
		let mut children_left = Vec::with_capacity(n_nodes);
		let mut children_right = Vec::with_capacity(n_nodes);
		let mut feature = Vec::with_capacity(n_nodes);
		let mut threshold = Vec::with_capacity(n_nodes);
		let mut impurity = Vec::with_capacity(n_nodes);
		for node in nodes {
			match node {
				Node::Branch(n) => {
					children_left.push(n.left_child_index);
					children_right.push(n.right_child_index);
					feature.push(n.feature_index);
					threshold.push(n.split_value);
					impurity.push(n.impurity);
				}
				Node::Leaf(n) => {
					children_left.push(LEAF);
					children_right.push(LEAF);
					feature.push(0);
					threshold.push(0.0);
					impurity.push(n.impurity);
				}
			}
		}
		Self::new(children_left, children_right, feature, threshold, impurity)
	}

	/// The largest feature index used by a branch node reachable from the root, or `None` if the root is a leaf.
	pub fn max_feature_index(&self) -> Option<usize> {
		reachable_nodes(self)
			.ok()?
			.into_iter()
			.filter(|node_index| !self.is_leaf(*node_index))
			.map(|node_index| self.feature[node_index])
			.max()
	}
}

impl DecisionTree for Tree {
	fn n_nodes(&self) -> usize {
		self.children_left.len()
	}

	fn children_left(&self, node_index: usize) -> usize {
		self.children_left[node_index]
	}

	fn children_right(&self, node_index: usize) -> usize {
		self.children_right[node_index]
	}

	fn feature(&self, node_index: usize) -> usize {
		self.feature[node_index]
	}

	fn threshold(&self, node_index: usize) -> f32 {
		self.threshold[node_index]
	}

	fn impurity(&self, node_index: usize) -> f32 {
		self.impurity[node_index]
	}
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
	if expected == actual {
		Ok(())
	} else {
		Err(Error::LengthMismatch {
			field,
			expected,
			actual,
		})
	}
}

/// Check that the nodes reachable from the root form a binary tree: every branch node's children are in range and no node can be reached twice. Nodes that cannot be reached from the root are ignored.
pub fn validate<T>(tree: &T) -> Result<(), Error>
where
	T: DecisionTree + ?Sized,
{
	reachable_nodes(tree).map(|_| ())
}

/// The indices of the nodes reachable from the root, in depth-first order, or the first reason they do not form a binary tree.
pub(crate) fn reachable_nodes<T>(tree: &T) -> Result<Vec<usize>, Error>
where
	T: DecisionTree + ?Sized,
{
	let n_nodes = tree.n_nodes();
	if n_nodes == 0 {
		return Err(Error::Empty);
	}
	let mut visited = vec![false; n_nodes];
	let mut reachable = Vec::new();
	let mut stack = vec![0];
	while let Some(node_index) = stack.pop() {
		if visited[node_index] {
			return Err(Error::NotATree { node_index });
		}
		visited[node_index] = true;
		reachable.push(node_index);
		if tree.is_leaf(node_index) {
			continue;
		}
		for child_index in &[
			tree.children_left(node_index),
			tree.children_right(node_index),
		] {
			if *child_index >= n_nodes {
				return Err(Error::ChildOutOfRange {
					node_index,
					child_index: *child_index,
					n_nodes,
				});
			}
			stack.push(*child_index);
		}
	}
	Ok(reachable)
}

#[cfg(test)]
pub(crate) fn branch(
	feature_index: usize,
	split_value: f32,
	impurity: f32,
	left_child_index: usize,
	right_child_index: usize,
) -> Node {
	Node::Branch(BranchNode {
		left_child_index,
		right_child_index,
		feature_index,
		split_value,
		impurity,
	})
}

#[cfg(test)]
pub(crate) fn leaf(impurity: f32) -> Node {
	Node::Leaf(LeafNode { impurity })
}

#[test]
fn test_from_nodes() {
	let tree = Tree::from_nodes(&[branch(3, 0.5, 0.5, 1, 2), leaf(0.0), leaf(0.1)]).unwrap();
	assert_eq!(tree.n_nodes(), 3);
	assert!(!tree.is_leaf(0));
	assert!(tree.is_leaf(1));
	assert_eq!(tree.children_right(0), 2);
	assert_eq!(tree.threshold(0), 0.5);
	assert_eq!(tree.impurity(2), 0.1);
	assert_eq!(tree.max_feature_index(), Some(3));
	let tree = Tree::from_nodes(&[leaf(0.3)]).unwrap();
	assert_eq!(tree.max_feature_index(), None);
}

#[test]
fn test_new_length_mismatch() {
	let result = Tree::new(
		vec![1, LEAF, LEAF],
		vec![2, LEAF, LEAF],
		vec![0, 0, 0],
		vec![0.5, 0.0],
		vec![0.5, 0.0, 0.0],
	);
	assert_eq!(
		result,
		Err(Error::LengthMismatch {
			field: "threshold",
			expected: 3,
			actual: 2,
		})
	);
}

#[test]
fn test_validate_errors() {
	assert_eq!(Tree::from_nodes(&[]), Err(Error::Empty));
	let result = Tree::from_nodes(&[branch(0, 0.5, 0.5, 1, 5), leaf(0.0)]);
	assert_eq!(
		result,
		Err(Error::ChildOutOfRange {
			node_index: 0,
			child_index: 5,
			n_nodes: 2,
		})
	);
	let result = Tree::from_nodes(&[branch(0, 0.5, 0.5, 1, 1), leaf(0.0)]);
	assert!(result.is_ok(), "equal children make node 0 a leaf");
	let result = Tree::from_nodes(&[branch(0, 0.5, 0.5, 1, 2), branch(1, 0.5, 0.3, 0, 2), leaf(0.0)]);
	assert!(matches!(result, Err(Error::NotATree { .. })));
}

#[test]
fn test_validate_ignores_unreachable_nodes() {
	let tree = Tree::from_nodes(&[
		branch(0, 0.5, 0.5, 1, 2),
		leaf(0.0),
		leaf(0.0),
		branch(7, 0.0, 0.0, 3, 9),
	])
	.unwrap();
	assert_eq!(tree.max_feature_index(), Some(0));
}
