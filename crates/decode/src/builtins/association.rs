use std::any::Any;

use serde::Deserialize;
use serde_json::Value;

use crate::capability::ListDecoder;
use crate::context::DecodingContext;
use crate::error::DecodeError;
use crate::model::ModelType;
use crate::provider::{AnyListProvider, ListProvider, ListState};

const IDENTIFIERS_KEY: &str = "associatedIdentifiers";
const FIELDS_KEY: &str = "associatedFields";

/// Deferred list strategy for relationships serialized as association metadata.
///
/// The payload names the owning record's identity and the foreign-key fields on the related
/// model, so the list can be queried later instead of being embedded.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssociationListDecoder;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssociationMetadata {
	associated_identifiers: Vec<String>,
	associated_fields: Vec<String>,
}

impl ListDecoder for AssociationListDecoder {
	fn name(&self) -> &str {
		"association"
	}

	fn should_decode(&self, _model: &ModelType, context: &dyn DecodingContext) -> bool {
		let Some(Value::Object(map)) = context.peek() else {
			return false;
		};
		matches!(map.get(IDENTIFIERS_KEY), Some(Value::Array(_)))
			&& matches!(map.get(FIELDS_KEY), Some(Value::Array(_)))
	}

	fn make_list_provider(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyListProvider, DecodeError> {
		let value = context.take()?;
		let metadata: AssociationMetadata =
			serde_json::from_value(value).map_err(|source| DecodeError::Json {
				path: context.path().to_owned(),
				source,
			})?;
		Ok(Box::new(AssociatedListProvider::new(
			*model,
			metadata.associated_identifiers,
			metadata.associated_fields,
		)))
	}
}

/// Not-yet-loaded list identified by its association keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedListProvider {
	model: ModelType,
	associated_identifiers: Vec<String>,
	associated_fields: Vec<String>,
}

impl AssociatedListProvider {
	pub fn new(
		model: ModelType,
		associated_identifiers: Vec<String>,
		associated_fields: Vec<String>,
	) -> Self {
		Self {
			model,
			associated_identifiers,
			associated_fields,
		}
	}

	pub fn associated_identifiers(&self) -> &[String] {
		&self.associated_identifiers
	}

	pub fn associated_fields(&self) -> &[String] {
		&self.associated_fields
	}
}

impl ListProvider for AssociatedListProvider {
	fn model_type(&self) -> ModelType {
		self.model
	}

	fn state(&self) -> ListState<'_> {
		ListState::NotLoaded {
			associated_identifiers: &self.associated_identifiers,
			associated_fields: &self.associated_fields,
		}
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
