use std::any::TypeId;

/// A record type known to the schema layer.
pub trait Model: 'static {
	/// Schema name of the record type.
	const MODEL_NAME: &'static str;
}

/// Runtime descriptor of the model a relationship points at.
///
/// Predicates inspect it to decide whether a strategy applies. Descriptors built with
/// [`ModelType::of`] carry the Rust type identity; [`ModelType::named`] covers schemas without a
/// Rust type, identified by a compile-time name. The two never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelType {
	name: &'static str,
	type_id: Option<TypeId>,
}

impl ModelType {
	pub fn of<M: Model>() -> Self {
		Self {
			name: M::MODEL_NAME,
			type_id: Some(TypeId::of::<M>()),
		}
	}

	pub const fn named(name: &'static str) -> Self {
		Self {
			name,
			type_id: None,
		}
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}

	pub fn type_id(&self) -> Option<TypeId> {
		self.type_id
	}

	/// Returns true if this descriptor was built from `M`.
	pub fn is<M: Model>(&self) -> bool {
		self.type_id == Some(TypeId::of::<M>())
	}
}

impl std::fmt::Display for ModelType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}
