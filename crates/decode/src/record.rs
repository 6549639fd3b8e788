//! Record-level relationship decoding.
//!
//! [`RecordDecoder`] is the dispatch caller: it walks a record's relationship fields, routes
//! to-many fields through the list family and to-one fields through the lazy family, and applies
//! the configured [`NoMatchPolicy`] when nothing matches.

use serde_json::{Map, Value};

use crate::config::NoMatchPolicy;
use crate::context::{DecodingContext, JsonCursor};
use crate::error::DecodeError;
use crate::model::ModelType;
use crate::provider::{AnyLazyProvider, AnyListProvider};
use crate::registry::DecoderRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
	/// One-to-many or many-to-many; decoded through the list family.
	HasMany,
	/// Decoded through the lazy family.
	HasOne,
	/// Decoded through the lazy family.
	BelongsTo,
}

/// A relationship field of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
	pub field: &'static str,
	pub target: ModelType,
	pub cardinality: Cardinality,
}

impl Relationship {
	pub const fn has_many(field: &'static str, target: ModelType) -> Self {
		Self {
			field,
			target,
			cardinality: Cardinality::HasMany,
		}
	}

	pub const fn has_one(field: &'static str, target: ModelType) -> Self {
		Self {
			field,
			target,
			cardinality: Cardinality::HasOne,
		}
	}

	pub const fn belongs_to(field: &'static str, target: ModelType) -> Self {
		Self {
			field,
			target,
			cardinality: Cardinality::BelongsTo,
		}
	}
}

/// Outcome of decoding one relationship field.
#[derive(Debug)]
pub enum DecodedField {
	List(AnyListProvider),
	Lazy(AnyLazyProvider),
	/// No strategy matched; the value is returned untouched.
	Raw(Value),
}

/// Decodes relationship fields of records against a [`DecoderRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder<'a> {
	registry: &'a DecoderRegistry,
	policy: NoMatchPolicy,
}

impl<'a> RecordDecoder<'a> {
	pub fn new(registry: &'a DecoderRegistry) -> Self {
		Self {
			registry,
			policy: NoMatchPolicy::default(),
		}
	}

	pub fn with_policy(mut self, policy: NoMatchPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Decodes one relationship field of a record of type `owner`.
	pub fn decode_field(
		&self,
		owner: &ModelType,
		relationship: &Relationship,
		value: Value,
	) -> Result<DecodedField, DecodeError> {
		let mut cursor = JsonCursor::new(format!("{owner}.{}", relationship.field), value);
		let decoded = match relationship.cardinality {
			Cardinality::HasMany => self
				.registry
				.dispatch_list(&relationship.target, &mut cursor)?
				.map(DecodedField::List),
			Cardinality::HasOne | Cardinality::BelongsTo => self
				.registry
				.dispatch_lazy(&relationship.target, &mut cursor)?
				.map(DecodedField::Lazy),
		};
		if let Some(decoded) = decoded {
			return Ok(decoded);
		}

		match self.policy {
			NoMatchPolicy::KeepRaw => cursor.take().map(DecodedField::Raw),
			NoMatchPolicy::Error => Err(DecodeError::NoStrategy {
				path: format!("{owner}.{}", relationship.field),
				model: relationship.target.name(),
			}),
		}
	}

	/// Decodes each present relationship field of `record`, then removes the decoded fields.
	///
	/// Fields absent from the record are skipped. The first error aborts the record and leaves
	/// `record` untouched.
	pub fn decode(
		&self,
		owner: &ModelType,
		record: &mut Map<String, Value>,
		relationships: &[Relationship],
	) -> Result<Vec<(&'static str, DecodedField)>, DecodeError> {
		let mut decoded = Vec::with_capacity(relationships.len());
		for relationship in relationships {
			let Some(value) = record.get(relationship.field) else {
				tracing::trace!(model = owner.name(), field = relationship.field, "field absent");
				continue;
			};
			let field = self.decode_field(owner, relationship, value.clone())?;
			decoded.push((relationship.field, field));
		}
		for (field, _) in &decoded {
			record.remove(*field);
		}
		Ok(decoded)
	}
}
