/// These are the options passed to `explain_tree`, `explain_linear`, and `whitebox_core::explain`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplainOptions {
	/// This option controls what happens when an explanation cannot be normalized because its denominator is zero. For trees, this is when no impurity reduction occurred along the decision path. For linear models, this is when every feature contributes the same amount.
	pub degenerate_normalization: DegenerateNormalization,
}

impl Default for ExplainOptions {
	fn default() -> Self {
		Self {
			degenerate_normalization: DegenerateNormalization::Error,
		}
	}
}

/// The policy applied to an explanation whose normalizing denominator is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DegenerateNormalization {
	/// Fail the whole call with a `NormalizeError`.
	Error,
	/// Return an explanation where every value is NaN.
	Nan,
	/// Return an explanation where every value is zero. For min-max rescaling this matches treating a zero range as a unit range.
	Zeros,
}
