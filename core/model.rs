use whitebox_linear::Regressor;
use whitebox_tree::Tree;

/// The trained models that can be explained. The variant decides which explainer is used.
#[derive(Clone, Debug, PartialEq)]
pub enum Model {
	Tree(Tree),
	Linear(Regressor),
}

#[derive(serde::Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ModelType {
	Tree,
	Linear,
}

impl Model {
	pub fn model_type(&self) -> ModelType {
		match self {
			Model::Tree(_) => ModelType::Tree,
			Model::Linear(_) => ModelType::Linear,
		}
	}
}

impl From<Tree> for Model {
	fn from(value: Tree) -> Self {
		Model::Tree(value)
	}
}

impl From<Regressor> for Model {
	fn from(value: Regressor) -> Self {
		Model::Linear(value)
	}
}
