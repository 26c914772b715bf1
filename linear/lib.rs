/*!
This crate computes local explanations for predictions made by a trained linear model. Each feature's raw contribution is its weight times its value in the example, and the contributions are then min-max rescaled into [0, 1].
*/

mod explain;

pub use self::explain::{contributions, explain_linear};

use ndarray::prelude::*;
use thiserror::Error;
use whitebox_util::NormalizeError;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
	#[error("the model has {n_weights} weights but the example has {n_features} features")]
	LengthMismatch { n_weights: usize, n_features: usize },
	#[error(transparent)]
	Normalize(#[from] NormalizeError),
}

/// A trained linear model, seen through its weights. There is one weight per feature, in the same order as the features in an example.
pub trait LinearModel {
	fn weights(&self) -> ArrayView1<f32>;
}

/// This struct describes a linear regressor model.
#[derive(Clone, Debug, PartialEq)]
pub struct Regressor {
	/// The bias does not contribute to any feature, so it is not part of an explanation.
	pub bias: f32,
	pub weights: Array1<f32>,
}

impl Regressor {
	pub fn predict(&self, example: ArrayView1<f32>) -> f32 {
		self.bias + self.weights.dot(&example)
	}
}

impl LinearModel for Regressor {
	fn weights(&self) -> ArrayView1<f32> {
		self.weights.view()
	}
}
