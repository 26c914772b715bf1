use crate::{Error, LinearModel};
use itertools::izip;
use ndarray::prelude::*;
use whitebox_util::{min_max_scale, ExplainOptions};

/// Compute the signed contribution of each feature, which is the feature's weight times its value in `example`.
pub fn contributions<M>(model: &M, example: ArrayView1<f32>) -> Result<Array1<f32>, Error>
where
	M: LinearModel + ?Sized,
{
	let weights = model.weights();
	if weights.len() != example.len() {
		return Err(Error::LengthMismatch {
			n_weights: weights.len(),
			n_features: example.len(),
		});
	}
	let mut contributions = Array1::<f32>::zeros(example.len());
	for (contribution, weight, feature) in izip!(contributions.iter_mut(), weights, example) {
		*contribution = weight * feature;
	}
	Ok(contributions)
}

/// Compute the local explanation for a single example. The feature with the smallest contribution gets 0, the feature with the largest gets 1, and the rest fall linearly in between. The minimum and maximum are taken over this example's contributions only.
pub fn explain_linear<M>(
	model: &M,
	example: ArrayView1<f32>,
	options: &ExplainOptions,
) -> Result<Array1<f32>, Error>
where
	M: LinearModel + ?Sized,
{
	let mut explanation = contributions(model, example)?;
	min_max_scale(explanation.view_mut(), options.degenerate_normalization)?;
	Ok(explanation)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Regressor;
	use whitebox_util::{DegenerateNormalization, NormalizeError};

	fn regressor(weights: &[f32]) -> Regressor {
		Regressor {
			bias: 0.0,
			weights: Array1::from(weights.to_vec()),
		}
	}

	#[test]
	fn test_contributions() {
		let model = regressor(&[2.0, -1.0, 0.0]);
		let contributions = contributions(&model, arr1(&[1.0, 1.0, 5.0]).view()).unwrap();
		assert_eq!(contributions, arr1(&[2.0, -1.0, 0.0]));
	}

	#[test]
	fn test_explain_linear() {
		let model = regressor(&[2.0, -1.0, 0.0]);
		let explanation =
			explain_linear(&model, arr1(&[1.0, 1.0, 5.0]).view(), &ExplainOptions::default())
				.unwrap();
		assert_eq!(explanation.len(), 3);
		assert_eq!(explanation[0], 1.0);
		assert_eq!(explanation[1], 0.0);
		assert!((explanation[2] - 1.0 / 3.0).abs() < 1e-6);
	}

	#[test]
	fn test_range_and_extremes() {
		let model = regressor(&[0.5, -3.0, 1.5, 2.0, -0.25]);
		let example = arr1(&[4.0, 0.5, -2.0, 1.0, 8.0]);
		let explanation = explain_linear(&model, example.view(), &ExplainOptions::default()).unwrap();
		assert!(explanation.iter().all(|value| (0.0..=1.0).contains(value)));
		assert!(explanation.iter().any(|value| *value == 0.0));
		assert!(explanation.iter().any(|value| *value == 1.0));
	}

	#[test]
	fn test_no_state_between_calls() {
		let model = regressor(&[1.0, 1.0]);
		let options = ExplainOptions::default();
		let first = explain_linear(&model, arr1(&[0.0, 10.0]).view(), &options).unwrap();
		let _ = explain_linear(&model, arr1(&[-100.0, 100.0]).view(), &options).unwrap();
		let again = explain_linear(&model, arr1(&[0.0, 10.0]).view(), &options).unwrap();
		assert_eq!(first, arr1(&[0.0, 1.0]));
		let first_bits: Vec<u32> = first.iter().map(|value| value.to_bits()).collect();
		let again_bits: Vec<u32> = again.iter().map(|value| value.to_bits()).collect();
		assert_eq!(first_bits, again_bits);
	}

	#[test]
	fn test_constant_contributions() {
		let model = regressor(&[1.0, 1.0]);
		let example = arr1(&[0.0, 0.0]);
		let result = explain_linear(&model, example.view(), &ExplainOptions::default());
		assert_eq!(
			result,
			Err(Error::Normalize(NormalizeError::ZeroRange { value: 0.0 }))
		);
		insta::assert_snapshot!(result.unwrap_err().to_string(), @"every contribution is equal to 0");
		let options = ExplainOptions {
			degenerate_normalization: DegenerateNormalization::Zeros,
		};
		let explanation = explain_linear(&model, example.view(), &options).unwrap();
		assert_eq!(explanation, arr1(&[0.0, 0.0]));
		let options = ExplainOptions {
			degenerate_normalization: DegenerateNormalization::Nan,
		};
		let explanation = explain_linear(&model, example.view(), &options).unwrap();
		assert!(explanation.iter().all(|value| value.is_nan()));
	}

	#[test]
	fn test_length_mismatch() {
		let model = regressor(&[1.0, 2.0, 3.0]);
		let result = explain_linear(&model, arr1(&[1.0]).view(), &ExplainOptions::default());
		assert_eq!(
			result,
			Err(Error::LengthMismatch {
				n_weights: 3,
				n_features: 1,
			})
		);
	}

	#[test]
	fn test_empty_example() {
		let model = regressor(&[]);
		let explanation =
			explain_linear(&model, Array1::<f32>::zeros(0).view(), &ExplainOptions::default())
				.unwrap();
		assert_eq!(explanation.len(), 0);
	}

	#[test]
	fn test_nan_feature() {
		let model = regressor(&[1.0, 2.0]);
		let result = explain_linear(&model, arr1(&[1.0, f32::NAN]).view(), &ExplainOptions::default());
		assert_eq!(
			result,
			Err(Error::Normalize(NormalizeError::NotFinite { index: 1 }))
		);
	}

	#[test]
	fn test_predict() {
		let model = Regressor {
			bias: 1.0,
			weights: arr1(&[2.0, -1.0]),
		};
		assert_eq!(model.predict(arr1(&[3.0, 4.0]).view()), 3.0);
	}
}
