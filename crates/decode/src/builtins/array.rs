use std::any::Any;

use serde_json::Value;

use crate::capability::ListDecoder;
use crate::context::{DecodingContext, kind};
use crate::error::DecodeError;
use crate::model::ModelType;
use crate::provider::{AnyListProvider, ListProvider, ListState};

/// Eager list strategy for relationships serialized as a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayLiteralListDecoder;

impl ListDecoder for ArrayLiteralListDecoder {
	fn name(&self) -> &str {
		"array-literal"
	}

	fn should_decode(&self, _model: &ModelType, context: &dyn DecodingContext) -> bool {
		matches!(context.peek(), Some(Value::Array(_)))
	}

	fn make_list_provider(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyListProvider, DecodeError> {
		match context.take()? {
			Value::Array(elements) => Ok(Box::new(ArrayListProvider::new(*model, elements))),
			other => Err(DecodeError::UnexpectedShape {
				path: context.path().to_owned(),
				expected: "array",
				found: kind(&other),
			}),
		}
	}
}

/// Materialized list of related records.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayListProvider {
	model: ModelType,
	elements: Vec<Value>,
}

impl ArrayListProvider {
	pub fn new(model: ModelType, elements: Vec<Value>) -> Self {
		Self { model, elements }
	}

	pub fn elements(&self) -> &[Value] {
		&self.elements
	}

	pub fn into_elements(self) -> Vec<Value> {
		self.elements
	}
}

impl ListProvider for ArrayListProvider {
	fn model_type(&self) -> ModelType {
		self.model
	}

	fn state(&self) -> ListState<'_> {
		ListState::Loaded(&self.elements)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
