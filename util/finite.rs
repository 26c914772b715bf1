use num_traits::Float;
use std::cmp::{Ord, Ordering};
use thiserror::Error;

/// A float that is neither NaN nor infinite. Because of this, `Finite` values are totally ordered, which lets the normalizations use `min` and `max` directly.
#[derive(Clone, Copy, Debug)]
pub struct Finite<T>(T)
where
	T: Float;

#[derive(Debug, Error, PartialEq)]
#[error("not finite")]
pub struct NotFiniteError;

impl<T> Finite<T>
where
	T: Float,
{
	pub fn new(value: T) -> Result<Self, NotFiniteError> {
		if value.is_finite() {
			Ok(Self(value))
		} else {
			Err(NotFiniteError)
		}
	}

	pub fn get(self) -> T {
		self.0
	}
}

impl<T> PartialEq for Finite<T>
where
	T: Float,
{
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

impl<T> Eq for Finite<T> where T: Float {}

impl<T> PartialOrd for Finite<T>
where
	T: Float,
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<T> Ord for Finite<T>
where
	T: Float,
{
	fn cmp(&self, other: &Self) -> Ordering {
		// Two finite floats always compare.
		self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
	}
}

pub trait ToFinite<T>
where
	T: Float,
{
	fn to_finite(self) -> Result<Finite<T>, NotFiniteError>;
}

impl<T> ToFinite<T> for T
where
	T: Float,
{
	fn to_finite(self) -> Result<Finite<T>, NotFiniteError> {
		Finite::new(self)
	}
}

#[test]
fn test_finite_rejects_nan_and_infinity() {
	assert_eq!(f32::NAN.to_finite(), Err(NotFiniteError));
	assert_eq!(f32::INFINITY.to_finite(), Err(NotFiniteError));
	assert_eq!(f32::NEG_INFINITY.to_finite(), Err(NotFiniteError));
	assert_eq!(1.5f32.to_finite().map(Finite::get), Ok(1.5));
}

#[test]
fn test_finite_ordering() {
	let a = Finite::new(-1.0f32).unwrap();
	let b = Finite::new(2.0f32).unwrap();
	assert_eq!(a.min(b), a);
	assert_eq!(a.max(b), b);
}
