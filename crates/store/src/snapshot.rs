//! Immutable published view of an [`crate::OrderedStore`].
//!
//! # Role
//!
//! Pure view type. It contains no mutation logic; a new snapshot is built for every publication.

use std::sync::Arc;

/// Ordered, immutable sequence of registered entries.
pub struct Snapshot<T: ?Sized> {
	pub(crate) entries: Arc<[Arc<T>]>,
	/// Publication counter, bumped by every append and by reset.
	pub(crate) generation: u64,
}

impl<T: ?Sized> Snapshot<T> {
	pub(crate) fn empty(generation: u64) -> Self {
		Self {
			entries: Arc::from(Vec::new()),
			generation,
		}
	}

	/// Number of entries in registration order.
	#[inline]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if nothing is registered.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the entry registered at `ordinal`.
	#[inline]
	pub fn get(&self, ordinal: usize) -> Option<&Arc<T>> {
		self.entries.get(ordinal)
	}

	/// Entries in registration order.
	#[inline]
	pub fn entries(&self) -> &[Arc<T>] {
		&self.entries
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Arc<T>> {
		self.entries.iter()
	}

	/// Monotonic publication counter of the owning store at the time this view was published.
	#[inline]
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

impl<T: ?Sized> Clone for Snapshot<T> {
	fn clone(&self) -> Self {
		Self {
			entries: self.entries.clone(),
			generation: self.generation,
		}
	}
}

impl<T: ?Sized> std::fmt::Debug for Snapshot<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Snapshot")
			.field("len", &self.entries.len())
			.field("generation", &self.generation)
			.finish()
	}
}

impl<'a, T: ?Sized> IntoIterator for &'a Snapshot<T> {
	type Item = &'a Arc<T>;
	type IntoIter = std::slice::Iter<'a, Arc<T>>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
