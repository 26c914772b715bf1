/*!
This crate is the entry point for computing local explanations. Wrap a trained decision tree or linear regressor in a [`Model`](enum.Model.html), then call [`explain`](fn.explain.html) with a single example to get one contribution per feature.

```
use ndarray::prelude::*;
use whitebox_core::{explain, BranchNode, ExplainOptions, LeafNode, Model, Node, Tree};

let tree = Tree::from_nodes(&[
	Node::Branch(BranchNode {
		left_child_index: 1,
		right_child_index: 2,
		feature_index: 0,
		split_value: 0.5,
		impurity: 0.5,
	}),
	Node::Leaf(LeafNode { impurity: 0.0 }),
	Node::Leaf(LeafNode { impurity: 0.0 }),
])
.unwrap();
let model = Model::from(tree);
let explanation = explain(&model, arr1(&[0.3, 9.9]).view(), &ExplainOptions::default()).unwrap();
assert_eq!(explanation.values, vec![1.0, 0.0]);
```
*/

#![allow(clippy::tabs_in_doc_comments)]

mod explain;
mod model;

pub use self::explain::{explain, Explanation, FeatureContribution};
pub use self::model::{Model, ModelType};
pub use whitebox_linear::{contributions, explain_linear, LinearModel, Regressor};
pub use whitebox_tree::{
	decision_path, explain_tree, BranchNode, DecisionTree, LeafNode, Node, PathStep, Tree,
};
pub use whitebox_util::{DegenerateNormalization, ExplainOptions, NormalizeError};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
	#[error(transparent)]
	Tree(#[from] whitebox_tree::Error),
	#[error(transparent)]
	Linear(#[from] whitebox_linear::Error),
}
