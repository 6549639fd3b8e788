use std::any::Any;

use serde::Deserialize;
use serde_json::Value;

use crate::capability::LazyModelDecoder;
use crate::context::DecodingContext;
use crate::error::DecodeError;
use crate::model::ModelType;
use crate::provider::{AnyLazyProvider, LazyProvider, LazyReferenceIdentifier, LazyState};

/// Lazy strategy for relationships serialized as a reference to the related record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceModelDecoder;

#[derive(Deserialize)]
struct ReferenceMetadata {
	identifiers: Vec<LazyReferenceIdentifier>,
	source: String,
}

impl LazyModelDecoder for ReferenceModelDecoder {
	fn name(&self) -> &str {
		"reference"
	}

	fn should_decode(&self, _model: &ModelType, context: &dyn DecodingContext) -> bool {
		let Some(Value::Object(map)) = context.peek() else {
			return false;
		};
		matches!(map.get("identifiers"), Some(Value::Array(_)))
			&& matches!(map.get("source"), Some(Value::String(_)))
	}

	fn make_provider(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyLazyProvider, DecodeError> {
		let value = context.take()?;
		let metadata: ReferenceMetadata =
			serde_json::from_value(value).map_err(|source| DecodeError::Json {
				path: context.path().to_owned(),
				source,
			})?;
		Ok(Box::new(ReferenceModelProvider::new(
			*model,
			metadata.identifiers,
			metadata.source,
		)))
	}
}

/// Not-yet-loaded record identified by its primary key components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceModelProvider {
	model: ModelType,
	identifiers: Vec<LazyReferenceIdentifier>,
	source: String,
}

impl ReferenceModelProvider {
	pub fn new(model: ModelType, identifiers: Vec<LazyReferenceIdentifier>, source: String) -> Self {
		Self {
			model,
			identifiers,
			source,
		}
	}

	pub fn identifiers(&self) -> &[LazyReferenceIdentifier] {
		&self.identifiers
	}

	/// Name of the backend that produced the reference.
	pub fn source(&self) -> &str {
		&self.source
	}
}

impl LazyProvider for ReferenceModelProvider {
	fn model_type(&self) -> ModelType {
		self.model
	}

	fn state(&self) -> LazyState<'_> {
		LazyState::NotLoaded {
			identifiers: &self.identifiers,
		}
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
