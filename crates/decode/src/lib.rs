#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Pluggable decode strategies for relationship fields.
//!
//! # Purpose
//!
//! While a record is deserialized, each relationship field must become either an eagerly
//! materialized list or a handle that resolves the related records later. The decoding pipeline
//! does not know in advance which representations exist: strategies are registered into a
//! [`DecoderRegistry`] by independent modules, and dispatch picks one per field at decode time.
//!
//! # Mental Model
//!
//! 1. **Registration:** Builtins, `inventory` plugins ([`DecoderPlugin`]) and application code
//!    append [`ListDecoder`] and [`LazyModelDecoder`] implementations. Order is preserved.
//! 2. **Dispatch:** [`DecoderRegistry::dispatch_list`] / [`DecoderRegistry::dispatch_lazy`]
//!    probe each strategy's predicate in registration order against a [`DecodingContext`] and
//!    run the factory of the first match. `Ok(None)` means nothing matched.
//! 3. **Record decoding:** [`RecordDecoder`] is the stock dispatch caller; it routes fields by
//!    [`Cardinality`] and applies the configured [`NoMatchPolicy`].
//!
//! # Invariants
//!
//! - Must probe in registration order and stop at the first match.
//!   - Enforced in: [`crate::dispatch::dispatch`].
//!   - Tested by: `invariants::test_first_match_wins`
//!   - Failure symptom: A later strategy shadows an earlier one.
//!
//! - Must run at most one factory per dispatch.
//!   - Enforced in: [`crate::dispatch::dispatch`] (returns after the first factory call).
//!   - Tested by: `invariants::test_at_most_one_factory`
//!   - Failure symptom: Cursor consumed twice, or two providers built for one field.
//!
//! - Must return factory errors unchanged.
//!   - Enforced in: [`crate::dispatch::dispatch`].
//!   - Tested by: `invariants::test_factory_error_propagates`
//!   - Failure symptom: Callers cannot tell which strategy failed or why.
//!
//! - Must keep predicates peek-only.
//!   - Enforced in: [`ListDecoder::should_decode`] (shared borrow), [`crate::dispatch::dispatch`]
//!     (position check).
//!   - Tested by: `invariants::test_cursor_advance_detected`
//!   - Failure symptom: Later candidates see a half-consumed cursor.
//!
//! - Must give concurrent dispatch a coherent view during registration.
//!   - Enforced in: [`linkage_store::OrderedStore`] (snapshot publication).
//!   - Tested by: `invariants::test_dispatch_during_registration`
//!   - Failure symptom: Dispatch probes a half-registered strategy list.

pub mod builtins;
mod capability;
mod config;
mod context;
mod dispatch;
mod error;
mod model;
mod plugin;
mod provider;
mod record;
mod registry;

pub use capability::{LazyModelDecoder, ListDecoder};
pub use config::{DecodeConfig, NoMatchPolicy, PluginConfig};
pub use context::{DecodingContext, JsonCursor};
pub use error::{ConfigError, DecodeError};
pub use inventory;
pub use linkage_store::Snapshot;
pub use model::{Model, ModelType};
pub use plugin::{DecoderPlugin, install_plugins, installation_order};
pub use provider::{
	AnyLazyProvider, AnyListProvider, LazyProvider, LazyReferenceIdentifier, LazyState,
	ListProvider, ListState,
};
pub use record::{Cardinality, DecodedField, RecordDecoder, Relationship};
pub use registry::DecoderRegistry;

#[cfg(test)]
pub(crate) mod invariants;

#[cfg(test)]
pub(crate) mod test_fixtures;
