//! Thread-safe append-only container with atomic publication.
//!
//! # Role
//!
//! This module provides the thread-safe entrypoint for registering entries and loading views.
//! It handles the CAS-based append loop.
//!
//! # Invariants
//!
//! - Concurrent registrations must be linearizable (see `invariants::test_no_lost_updates`).

use std::ops::Range;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::snapshot::Snapshot;

/// Ordered registration store for shared, immutable entries.
///
/// `T` may be unsized, so trait objects register directly as `Arc<dyn Trait>`.
pub struct OrderedStore<T>
where
	T: ?Sized + Send + Sync + 'static,
{
	label: &'static str,
	snap: ArcSwap<Snapshot<T>>,
}

impl<T> OrderedStore<T>
where
	T: ?Sized + Send + Sync + 'static,
{
	/// Creates an empty store. `label` names the store in logs.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			snap: ArcSwap::from_pointee(Snapshot::empty(0)),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Appends `entry` and returns the ordinal it was published at.
	pub fn register(&self, entry: Arc<T>) -> usize {
		self.register_many(std::iter::once(entry)).start
	}

	/// Appends a batch as one contiguous run and returns the ordinals it occupies.
	///
	/// Readers observe either none or all of the batch.
	pub fn register_many<I>(&self, entries: I) -> Range<usize>
	where
		I: IntoIterator<Item = Arc<T>>,
	{
		let batch: Vec<Arc<T>> = entries.into_iter().collect();
		if batch.is_empty() {
			let len = self.len();
			return len..len;
		}

		loop {
			let old = self.snap.load_full();

			let start = old.entries.len();
			let mut entries: Vec<Arc<T>> = Vec::with_capacity(start + batch.len());
			entries.extend(old.entries.iter().cloned());
			entries.extend(batch.iter().cloned());

			let new_snap = Arc::new(Snapshot {
				entries: Arc::from(entries),
				generation: old.generation + 1,
			});

			let prev = self.snap.compare_and_swap(&old, new_snap);
			if Arc::ptr_eq(&prev, &old) {
				tracing::debug!(
					store = self.label,
					start,
					count = batch.len(),
					"registered entries"
				);
				return start..start + batch.len();
			}
			// CAS failed, retry with updated snapshot
			tracing::trace!(store = self.label, "registration raced, retrying");
		}
	}

	/// Returns the current view.
	#[inline]
	pub fn snapshot(&self) -> Arc<Snapshot<T>> {
		self.snap.load_full()
	}

	/// Returns the number of registered entries.
	pub fn len(&self) -> usize {
		self.snap.load().entries.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Clears every registration.
	///
	/// Snapshots handed out earlier stay valid and keep their entries alive until dropped.
	pub fn reset(&mut self) {
		let generation = self.snap.load().generation + 1;
		self.snap.store(Arc::new(Snapshot::empty(generation)));
		tracing::debug!(store = self.label, generation, "store reset");
	}
}

impl<T> std::fmt::Debug for OrderedStore<T>
where
	T: ?Sized + Send + Sync + 'static,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snap = self.snap.load();
		f.debug_struct("OrderedStore")
			.field("label", &self.label)
			.field("len", &snap.entries.len())
			.field("generation", &snap.generation)
			.finish()
	}
}
