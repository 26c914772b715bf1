use crate::{Error, Model, ModelType};
use itertools::Itertools;
use ndarray::prelude::*;
use std::cmp::Ordering;
use whitebox_util::ExplainOptions;

/// The local explanation for a single example. `values` has one entry per feature, in the same order as the example.
#[derive(serde::Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
	pub model_type: ModelType,
	pub values: Vec<f32>,
}

#[derive(serde::Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureContribution {
	pub feature_index: usize,
	pub value: f32,
}

/// Compute the local explanation of `model`'s prediction for `example`. Trees are explained with `explain_tree` and linear models with `explain_linear`.
pub fn explain(
	model: &Model,
	example: ArrayView1<f32>,
	options: &ExplainOptions,
) -> Result<Explanation, Error> {
	let values = match model {
		Model::Tree(tree) => whitebox_tree::explain_tree(tree, example, options)?,
		Model::Linear(regressor) => whitebox_linear::explain_linear(regressor, example, options)?,
	};
	Ok(Explanation {
		model_type: model.model_type(),
		values: values.into_raw_vec(),
	})
}

impl Explanation {
	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Feature indices from the largest contribution to the smallest. Ties keep feature order and NaN values come last.
	pub fn ranked(&self) -> Vec<usize> {
		(0..self.values.len())
			.sorted_by(|a, b| compare_descending(self.values[*a], self.values[*b]))
			.collect()
	}

	/// The `k` features with the largest contributions.
	pub fn top_k(&self, k: usize) -> Vec<FeatureContribution> {
		self.ranked()
			.into_iter()
			.take(k)
			.map(|feature_index| FeatureContribution {
				feature_index,
				value: self.values[feature_index],
			})
			.collect()
	}
}

fn compare_descending(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use whitebox_linear::Regressor;
	use whitebox_tree::{BranchNode, LeafNode, Node, Tree};
	use whitebox_util::{DegenerateNormalization, NormalizeError};

	fn stump() -> Model {
		Model::from(
			Tree::from_nodes(&[
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
			.unwrap(),
		)
	}

	fn linear(weights: &[f32]) -> Model {
		Model::from(Regressor {
			bias: 0.0,
			weights: Array1::from(weights.to_vec()),
		})
	}

	#[test]
	fn test_explain_tree() {
		let explanation =
			explain(&stump(), arr1(&[0.8, 9.9]).view(), &ExplainOptions::default()).unwrap();
		assert_eq!(explanation.model_type, ModelType::Tree);
		assert_eq!(explanation.values, vec![1.0, 0.0]);
		assert_eq!(
			serde_json::to_string(&explanation).unwrap(),
			r#"{"modelType":"tree","values":[1.0,0.0]}"#
		);
	}

	#[test]
	fn test_explain_linear() {
		let model = linear(&[2.0, -1.0, 0.0]);
		let explanation =
			explain(&model, arr1(&[1.0, 1.0, 5.0]).view(), &ExplainOptions::default()).unwrap();
		assert_eq!(explanation.model_type, ModelType::Linear);
		assert_eq!(explanation.len(), 3);
		assert_eq!(explanation.ranked(), vec![0, 2, 1]);
		let top = explanation.top_k(1);
		assert_eq!(
			top,
			vec![FeatureContribution {
				feature_index: 0,
				value: 1.0,
			}]
		);
	}

	#[test]
	fn test_ranked_ties_and_nan() {
		let explanation = Explanation {
			model_type: ModelType::Linear,
			values: vec![0.5, f32::NAN, 1.0, 0.5, 0.0],
		};
		assert_eq!(explanation.ranked(), vec![2, 0, 3, 4, 1]);
		assert_eq!(explanation.top_k(10).len(), 5);
		assert!(Explanation {
			model_type: ModelType::Tree,
			values: vec![],
		}
		.is_empty());
	}

	#[test]
	fn test_errors() {
		let explanation =
			explain(&stump(), arr1(&[0.3]).view(), &ExplainOptions::default()).unwrap();
		assert_eq!(explanation.values, vec![1.0]);
		let result = explain(
			&stump(),
			Array1::<f32>::zeros(0).view(),
			&ExplainOptions::default(),
		);
		assert_eq!(
			result,
			Err(Error::Tree(whitebox_tree::Error::FeatureOutOfRange {
				node_index: 0,
				feature_index: 0,
				n_features: 0,
			}))
		);
		let result = explain(
			&linear(&[1.0, 1.0]),
			arr1(&[0.0, 0.0]).view(),
			&ExplainOptions::default(),
		);
		assert_eq!(
			result,
			Err(Error::Linear(whitebox_linear::Error::Normalize(
				NormalizeError::ZeroRange { value: 0.0 }
			)))
		);
		insta::assert_snapshot!(result.unwrap_err().to_string(), @"every contribution is equal to 0");
	}

	#[test]
	fn test_degenerate_zeros_option() {
		let options = ExplainOptions {
			degenerate_normalization: DegenerateNormalization::Zeros,
		};
		let explanation = explain(&linear(&[1.0, 1.0]), arr1(&[0.0, 0.0]).view(), &options).unwrap();
		assert_eq!(explanation.values, vec![0.0, 0.0]);
	}
}
