//! Type-erased relationship providers.
//!
//! A provider is what a winning strategy hands back to the decode caller: either an eagerly
//! materialized list or a handle describing how to load the related records later. Ownership
//! passes to the caller; the registry never holds on to providers.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::ModelType;

/// Load state of a to-many relationship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListState<'a> {
	/// Records are materialized.
	Loaded(&'a [Value]),
	/// Records are resolved later from the owning record's identity.
	NotLoaded {
		associated_identifiers: &'a [String],
		associated_fields: &'a [String],
	},
}

/// Provider for a to-many relationship.
pub trait ListProvider: Send + Sync + std::fmt::Debug + 'static {
	/// Model of the elements.
	fn model_type(&self) -> ModelType;

	fn state(&self) -> ListState<'_>;

	fn as_any(&self) -> &dyn Any;
}

/// Owned, type-erased list provider.
pub type AnyListProvider = Box<dyn ListProvider>;

impl dyn ListProvider {
	/// Downcasts to a concrete provider.
	pub fn downcast_ref<P: ListProvider>(&self) -> Option<&P> {
		self.as_any().downcast_ref()
	}
}

/// One component of the identity of a not-yet-loaded record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LazyReferenceIdentifier {
	pub name: String,
	pub value: String,
}

/// Load state of a to-one relationship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LazyState<'a> {
	/// The related record is present; `None` means the relationship is empty.
	Loaded(Option<&'a Value>),
	/// The related record is resolved later by identifier.
	NotLoaded {
		identifiers: &'a [LazyReferenceIdentifier],
	},
}

/// Provider for a lazily resolved relationship.
pub trait LazyProvider: Send + Sync + std::fmt::Debug + 'static {
	/// Model of the related record.
	fn model_type(&self) -> ModelType;

	fn state(&self) -> LazyState<'_>;

	fn as_any(&self) -> &dyn Any;
}

/// Owned, type-erased lazy provider.
pub type AnyLazyProvider = Box<dyn LazyProvider>;

impl dyn LazyProvider {
	/// Downcasts to a concrete provider.
	pub fn downcast_ref<P: LazyProvider>(&self) -> Option<&P> {
		self.as_any().downcast_ref()
	}
}
