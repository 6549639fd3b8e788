//! Strategy contracts for relationship decoding.
//!
//! Both families share one shape: a side-effect free predicate that peeks at the cursor, and a
//! factory that is only called for the first matching strategy. [`Strategy`] folds the two
//! families onto a single dispatch routine.

use crate::context::DecodingContext;
use crate::error::DecodeError;
use crate::model::ModelType;
use crate::provider::{AnyLazyProvider, AnyListProvider};

/// Strategy that turns a to-many relationship field into a [`crate::ListProvider`].
pub trait ListDecoder: Send + Sync + 'static {
	/// Name used in logs and errors.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	/// Returns true if this strategy handles the value at the cursor.
	///
	/// Must only inspect `context`; a `false` answer hands the same cursor to the next candidate.
	fn should_decode(&self, model: &ModelType, context: &dyn DecodingContext) -> bool;

	/// Builds the provider. Called only when [`ListDecoder::should_decode`] returned true.
	fn make_list_provider(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyListProvider, DecodeError>;
}

/// Strategy that turns a relationship field into a [`crate::LazyProvider`].
pub trait LazyModelDecoder: Send + Sync + 'static {
	/// Name used in logs and errors.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	/// Returns true if this strategy handles the value at the cursor.
	///
	/// Must only inspect `context`; a `false` answer hands the same cursor to the next candidate.
	fn should_decode(&self, model: &ModelType, context: &dyn DecodingContext) -> bool;

	/// Builds the provider. Called only when [`LazyModelDecoder::should_decode`] returned true.
	fn make_provider(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyLazyProvider, DecodeError>;
}

/// Family-independent view of a strategy, implemented for both trait objects.
pub(crate) trait Strategy: Send + Sync + 'static {
	type Provider;

	/// Family label for logs.
	const FAMILY: &'static str;

	fn name(&self) -> &str;

	fn probe(&self, model: &ModelType, context: &dyn DecodingContext) -> bool;

	fn provide(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<Self::Provider, DecodeError>;
}

impl Strategy for dyn ListDecoder {
	type Provider = AnyListProvider;

	const FAMILY: &'static str = "list";

	fn name(&self) -> &str {
		ListDecoder::name(self)
	}

	fn probe(&self, model: &ModelType, context: &dyn DecodingContext) -> bool {
		self.should_decode(model, context)
	}

	fn provide(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyListProvider, DecodeError> {
		self.make_list_provider(model, context)
	}
}

impl Strategy for dyn LazyModelDecoder {
	type Provider = AnyLazyProvider;

	const FAMILY: &'static str = "lazy";

	fn name(&self) -> &str {
		LazyModelDecoder::name(self)
	}

	fn probe(&self, model: &ModelType, context: &dyn DecodingContext) -> bool {
		self.should_decode(model, context)
	}

	fn provide(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyLazyProvider, DecodeError> {
		self.make_provider(model, context)
	}
}
