/*!
This module computes local explanations for trees.

The prediction of a decision tree is decided by the path from the root to a leaf, and each branch node on that path looks at a single feature. Each of those features is credited with the decrease in impurity from the node to the child the example was sent to. A feature used by more than one node on the path accumulates the credit from each of them. Finally the credits are divided by their total so the explanation sums to one.
*/

use crate::{types::reachable_nodes, DecisionTree, Error};
use ndarray::prelude::*;
use whitebox_util::{normalize_by_total, ExplainOptions};

/// One branch node on the path an example takes through a tree.
#[derive(Clone, Debug, PartialEq)]
pub struct PathStep {
	pub node_index: usize,
	pub feature_index: usize,
	/// The child the example was sent to.
	pub child_index: usize,
	/// The impurity of the node minus the impurity of the child. This is nonnegative for trees trained by impurity reduction, but nothing here relies on it.
	pub impurity_decrease: f32,
}

/// Compute the path `example` takes from the root of `tree` to a leaf. Feature values <= a node's threshold go left. All others, including NaN, go right.
pub fn decision_path<T>(tree: &T, example: ArrayView1<f32>) -> Result<Vec<PathStep>, Error>
where
	T: DecisionTree + ?Sized,
{
	let reachable = reachable_nodes(tree)?;
	check_features(tree, &reachable, example.len())?;
	let mut path = Vec::new();
	let mut node_index = 0;
	while !tree.is_leaf(node_index) {
		let feature_index = tree.feature(node_index);
		let child_index = if example[feature_index] <= tree.threshold(node_index) {
			tree.children_left(node_index)
		} else {
			tree.children_right(node_index)
		};
		let impurity_decrease = tree.impurity(node_index) - tree.impurity(child_index);
		log::trace!(
			"node {} sent feature {} to node {}, impurity decrease {}",
			node_index,
			feature_index,
			child_index,
			impurity_decrease,
		);
		path.push(PathStep {
			node_index,
			feature_index,
			child_index,
			impurity_decrease,
		});
		node_index = child_index;
	}
	Ok(path)
}

/// Compute the local explanation for a single example. The returned array has one entry per feature in `example`. Features that are not split on along the decision path get exactly zero, and the rest sum to one.
pub fn explain_tree<T>(
	tree: &T,
	example: ArrayView1<f32>,
	options: &ExplainOptions,
) -> Result<Array1<f32>, Error>
where
	T: DecisionTree + ?Sized,
{
	let path = decision_path(tree, example)?;
	let mut explanation = Array1::<f32>::zeros(example.len());
	for step in path.iter() {
		explanation[step.feature_index] += step.impurity_decrease;
	}
	normalize_by_total(explanation.view_mut(), options.degenerate_normalization)?;
	Ok(explanation)
}

/// Every branch node reachable from the root must split on a feature the example has, whether or not this example reaches it.
fn check_features<T>(tree: &T, reachable: &[usize], n_features: usize) -> Result<(), Error>
where
	T: DecisionTree + ?Sized,
{
	for &node_index in reachable {
		if tree.is_leaf(node_index) {
			continue;
		}
		let feature_index = tree.feature(node_index);
		if feature_index >= n_features {
			return Err(Error::FeatureOutOfRange {
				node_index,
				feature_index,
				n_features,
			});
		}
	}
	Ok(())
}
