/*!
This crate holds the pieces shared by the tree and linear explainers: the options that control how explanations are normalized, the normalizations themselves, and a float wrapper that rules out NaN and infinity.
*/

pub mod finite;
pub mod normalize;
mod options;

pub use self::normalize::{min_max_scale, normalize_by_total, NormalizeError};
pub use self::options::{DegenerateNormalization, ExplainOptions};
