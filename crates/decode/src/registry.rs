//! The decoder registry handed to the decoding pipeline.
//!
//! # Purpose
//!
//! Owns the two registration stores (list strategies and lazy strategies) and exposes
//! registration, snapshot listing, dispatch and reset. It is an explicit value rather than
//! process-wide state: configurations that need different strategy sets build separate
//! registries, and tests get isolation for free.
//!
//! # Lifecycle
//!
//! 1. Startup: [`DecoderRegistry::from_config`] installs builtins and plugins; further modules
//!    call the `register_*` methods, possibly from several threads.
//! 2. Steady state: record decoding calls [`DecoderRegistry::dispatch_list`] and
//!    [`DecoderRegistry::dispatch_lazy`] once per relationship field, concurrently.
//! 3. Teardown: [`DecoderRegistry::reset`] clears both stores. It needs `&mut self`, so it cannot
//!    overlap a dispatch or registration that borrows the registry.

use std::sync::Arc;

use linkage_store::{OrderedStore, Snapshot};

use crate::builtins;
use crate::capability::{LazyModelDecoder, ListDecoder};
use crate::config::DecodeConfig;
use crate::context::DecodingContext;
use crate::dispatch::dispatch;
use crate::error::DecodeError;
use crate::model::ModelType;
use crate::plugin;
use crate::provider::{AnyLazyProvider, AnyListProvider};

/// Ordered registries of list and lazy decode strategies.
pub struct DecoderRegistry {
	list: OrderedStore<dyn ListDecoder>,
	lazy: OrderedStore<dyn LazyModelDecoder>,
}

impl Default for DecoderRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl DecoderRegistry {
	/// Creates a registry with no strategies.
	pub fn new() -> Self {
		Self {
			list: OrderedStore::new("list-decoders"),
			lazy: OrderedStore::new("lazy-decoders"),
		}
	}

	/// Creates a registry holding only the builtin strategies.
	pub fn with_builtins() -> Self {
		let registry = Self::new();
		builtins::register_all(&registry);
		registry
	}

	/// Creates a registry as described by `config`: builtins first, then plugins.
	pub fn from_config(config: &DecodeConfig) -> Self {
		let registry = Self::new();
		if config.builtins {
			builtins::register_all(&registry);
		}
		if config.plugins.enabled {
			plugin::install_plugins(&registry, &config.plugins.disabled);
		}
		tracing::info!(
			list = registry.list.len(),
			lazy = registry.lazy.len(),
			"decoder registry ready"
		);
		registry
	}

	/// Appends a list strategy and returns its ordinal.
	pub fn register_list_decoder<D: ListDecoder>(&self, decoder: D) -> usize {
		self.register_list_decoder_arc(Arc::new(decoder))
	}

	/// Appends a shared list strategy. The same `Arc` may be registered more than once.
	pub fn register_list_decoder_arc(&self, decoder: Arc<dyn ListDecoder>) -> usize {
		let name = decoder.name().to_owned();
		let ordinal = self.list.register(decoder);
		tracing::debug!(decoder = %name, ordinal, "registered list decoder");
		ordinal
	}

	/// Appends a lazy strategy and returns its ordinal.
	pub fn register_lazy_decoder<D: LazyModelDecoder>(&self, decoder: D) -> usize {
		self.register_lazy_decoder_arc(Arc::new(decoder))
	}

	/// Appends a shared lazy strategy. The same `Arc` may be registered more than once.
	pub fn register_lazy_decoder_arc(&self, decoder: Arc<dyn LazyModelDecoder>) -> usize {
		let name = decoder.name().to_owned();
		let ordinal = self.lazy.register(decoder);
		tracing::debug!(decoder = %name, ordinal, "registered lazy decoder");
		ordinal
	}

	/// List strategies in registration order.
	pub fn list_decoders(&self) -> Arc<Snapshot<dyn ListDecoder>> {
		self.list.snapshot()
	}

	/// Lazy strategies in registration order.
	pub fn lazy_decoders(&self) -> Arc<Snapshot<dyn LazyModelDecoder>> {
		self.lazy.snapshot()
	}

	/// Selects a list strategy for the field at `context` and builds its provider.
	///
	/// `Ok(None)` means no strategy matched; the caller picks the fallback.
	pub fn dispatch_list(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<Option<AnyListProvider>, DecodeError> {
		dispatch(&self.list.snapshot(), model, context)
	}

	/// Selects a lazy strategy for the field at `context` and builds its provider.
	///
	/// `Ok(None)` means no strategy matched; the caller picks the fallback.
	pub fn dispatch_lazy(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<Option<AnyLazyProvider>, DecodeError> {
		dispatch(&self.lazy.snapshot(), model, context)
	}

	/// Removes every registered strategy from both families.
	pub fn reset(&mut self) {
		self.list.reset();
		self.lazy.reset();
	}
}

impl std::fmt::Debug for DecoderRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DecoderRegistry")
			.field("list", &self.list)
			.field("lazy", &self.lazy)
			.finish()
	}
}
