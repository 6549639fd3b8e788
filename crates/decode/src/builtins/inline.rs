use std::any::Any;

use serde_json::Value;

use crate::capability::LazyModelDecoder;
use crate::context::{DecodingContext, kind};
use crate::error::DecodeError;
use crate::model::ModelType;
use crate::provider::{AnyLazyProvider, LazyProvider, LazyState};

/// Lazy strategy for relationships whose record is embedded in place.
///
/// Matches any object, so it must be probed after more specific object payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineModelDecoder;

impl LazyModelDecoder for InlineModelDecoder {
	fn name(&self) -> &str {
		"inline"
	}

	fn should_decode(&self, _model: &ModelType, context: &dyn DecodingContext) -> bool {
		matches!(context.peek(), Some(Value::Object(_) | Value::Null))
	}

	fn make_provider(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyLazyProvider, DecodeError> {
		let record = match context.take()? {
			Value::Null => None,
			record @ Value::Object(_) => Some(record),
			other => {
				return Err(DecodeError::UnexpectedShape {
					path: context.path().to_owned(),
					expected: "object or null",
					found: kind(&other),
				});
			}
		};
		Ok(Box::new(InlineModelProvider::new(*model, record)))
	}
}

/// Already materialized related record.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineModelProvider {
	model: ModelType,
	record: Option<Value>,
}

impl InlineModelProvider {
	pub fn new(model: ModelType, record: Option<Value>) -> Self {
		Self { model, record }
	}

	pub fn record(&self) -> Option<&Value> {
		self.record.as_ref()
	}
}

impl LazyProvider for InlineModelProvider {
	fn model_type(&self) -> ModelType {
		self.model
	}

	fn state(&self) -> LazyState<'_> {
		LazyState::Loaded(self.record.as_ref())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
