#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Append-only ordered registration store.
//!
//! # Purpose
//!
//! Holds an ordered sequence of shared, immutable entries that independent call sites append to
//! during startup and that hot paths read concurrently. Registration order is the only ordering
//! the store knows about, and it is preserved exactly.
//!
//! # Mental Model
//!
//! 1. **Publication:** Every append builds a replacement [`Snapshot`] from the current one and
//!    publishes it with compare-and-swap. Losing the race means another writer went first; the
//!    writer retries on top of the newer snapshot.
//! 2. **Consumption:** Readers load an `Arc<Snapshot>` and iterate it. The snapshot never
//!    changes after publication, so an in-progress append is either fully visible or invisible.
//! 3. **Reset:** [`OrderedStore::reset`] takes `&mut self`; exclusive access is the caller's
//!    proof that no dispatch or registration is in flight.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of current snapshot).
//! - **Writes:** Lock-free with linearizability (CAS retry loop on registration).
//!
//! # Invariants
//!
//! - Must preserve single-thread registration order.
//!   - Enforced in: [`OrderedStore::register`] (appends at the tail of the loaded snapshot).
//!   - Tested by: [`crate::invariants::test_registration_order_preserved`]
//!   - Failure symptom: Dispatch probes candidates in the wrong order.
//!
//! - Must provide linearizable writes without lost updates.
//!   - Enforced in: [`OrderedStore::register_many`] (CAS loop).
//!   - Tested by: [`crate::invariants::test_no_lost_updates`]
//!   - Failure symptom: Concurrent registrations silently dropped.
//!
//! - Must never expose a partially published batch.
//!   - Enforced in: [`Snapshot`] (immutable after publish).
//!   - Tested by: [`crate::invariants::test_no_torn_batches`]
//!   - Failure symptom: A reader observes half of a `register_many` batch.
//!
//! - Must retain duplicates as distinct entries.
//!   - Enforced in: [`OrderedStore::register`] (no identity check).
//!   - Tested by: [`crate::invariants::test_duplicates_retained`]
//!   - Failure symptom: Registering the same entry twice yields one candidate.

mod snapshot;
mod store;

pub use snapshot::Snapshot;
pub use store::OrderedStore;

#[cfg(any(test, doc))]
pub(crate) mod invariants;
