/*!
This module implements the two normalizations applied to raw feature contributions. Tree explanations are divided by their total so they sum to one. Linear explanations are min-max rescaled into [0, 1].

Both functions compute everything they need from the values passed in, so there is no state carried from one call to the next.
*/

use crate::{
	finite::{Finite, ToFinite},
	DegenerateNormalization,
};
use ndarray::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
	#[error("the contributions sum to zero")]
	ZeroTotal,
	#[error("every contribution is equal to {value}")]
	ZeroRange { value: f32 },
	#[error("the contribution for feature {index} is not finite")]
	NotFinite { index: usize },
	#[error("the sum of the contributions is not finite")]
	NotFiniteTotal,
	#[error("the range of the contributions is not finite")]
	NotFiniteRange,
}

/// Divide each value by the sum of all values so that the values sum to one.
pub fn normalize_by_total(
	mut values: ArrayViewMut1<f32>,
	degenerate_normalization: DegenerateNormalization,
) -> Result<(), NormalizeError> {
	let total = values
		.iter()
		.sum::<f32>()
		.to_finite()
		.map_err(|_| NormalizeError::NotFiniteTotal)?
		.get();
	if total == 0.0 {
		return resolve_degenerate(values, degenerate_normalization, NormalizeError::ZeroTotal);
	}
	values.mapv_inplace(|value| value / total);
	Ok(())
}

/// Rescale the values so the minimum maps to 0 and the maximum maps to 1. An empty view is left as is.
pub fn min_max_scale(
	mut values: ArrayViewMut1<f32>,
	degenerate_normalization: DegenerateNormalization,
) -> Result<(), NormalizeError> {
	let mut bounds: Option<(Finite<f32>, Finite<f32>)> = None;
	for (index, value) in values.iter().enumerate() {
		let value = Finite::new(*value).map_err(|_| NormalizeError::NotFinite { index })?;
		bounds = Some(match bounds {
			None => (value, value),
			Some((min, max)) => (min.min(value), max.max(value)),
		});
	}
	let (min, max) = match bounds {
		Some(bounds) => bounds,
		None => return Ok(()),
	};
	let min = min.get();
	let range = (max.get() - min)
		.to_finite()
		.map_err(|_| NormalizeError::NotFiniteRange)?
		.get();
	if range == 0.0 {
		return resolve_degenerate(
			values,
			degenerate_normalization,
			NormalizeError::ZeroRange { value: min },
		);
	}
	values.mapv_inplace(|value| (value - min) / range);
	Ok(())
}

fn resolve_degenerate(
	mut values: ArrayViewMut1<f32>,
	degenerate_normalization: DegenerateNormalization,
	error: NormalizeError,
) -> Result<(), NormalizeError> {
	match degenerate_normalization {
		DegenerateNormalization::Error => Err(error),
		DegenerateNormalization::Nan => {
			log::debug!("{}, filling the explanation with NaN", error);
			values.fill(f32::NAN);
			Ok(())
		}
		DegenerateNormalization::Zeros => {
			log::debug!("{}, filling the explanation with zeros", error);
			values.fill(0.0);
			Ok(())
		}
	}
}

#[test]
fn test_normalize_by_total() {
	let mut values = arr1(&[0.25, 0.0, 0.75, 1.0]);
	normalize_by_total(values.view_mut(), DegenerateNormalization::Error).unwrap();
	assert_eq!(values, arr1(&[0.125, 0.0, 0.375, 0.5]));
}

#[test]
fn test_normalize_by_total_zero_total() {
	let mut values = arr1(&[0.5, -0.5, 0.0]);
	let result = normalize_by_total(values.view_mut(), DegenerateNormalization::Error);
	assert_eq!(result, Err(NormalizeError::ZeroTotal));
	normalize_by_total(values.view_mut(), DegenerateNormalization::Zeros).unwrap();
	assert_eq!(values, arr1(&[0.0, 0.0, 0.0]));
	normalize_by_total(values.view_mut(), DegenerateNormalization::Nan).unwrap();
	assert!(values.iter().all(|value| value.is_nan()));
}

#[test]
fn test_normalize_by_total_not_finite() {
	let mut values = arr1(&[0.5, f32::NAN]);
	let result = normalize_by_total(values.view_mut(), DegenerateNormalization::Nan);
	assert_eq!(result, Err(NormalizeError::NotFiniteTotal));
}

#[test]
fn test_min_max_scale() {
	let mut values = arr1(&[2.0, -1.0, 0.0]);
	min_max_scale(values.view_mut(), DegenerateNormalization::Error).unwrap();
	assert_eq!(values[0], 1.0);
	assert_eq!(values[1], 0.0);
	assert!((values[2] - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_min_max_scale_zero_range() {
	let mut values = arr1(&[3.0, 3.0]);
	let result = min_max_scale(values.view_mut(), DegenerateNormalization::Error);
	assert_eq!(result, Err(NormalizeError::ZeroRange { value: 3.0 }));
	assert_eq!(values, arr1(&[3.0, 3.0]));
	min_max_scale(values.view_mut(), DegenerateNormalization::Zeros).unwrap();
	assert_eq!(values, arr1(&[0.0, 0.0]));
}

#[test]
fn test_min_max_scale_empty_and_not_finite() {
	let mut values = Array1::<f32>::zeros(0);
	min_max_scale(values.view_mut(), DegenerateNormalization::Error).unwrap();
	assert_eq!(values.len(), 0);
	let mut values = arr1(&[1.0, f32::INFINITY, 0.0]);
	let result = min_max_scale(values.view_mut(), DegenerateNormalization::Zeros);
	assert_eq!(result, Err(NormalizeError::NotFinite { index: 1 }));
	let mut values = arr1(&[f32::MAX, -f32::MAX]);
	let result = min_max_scale(values.view_mut(), DegenerateNormalization::Zeros);
	assert_eq!(result, Err(NormalizeError::NotFiniteRange));
}
