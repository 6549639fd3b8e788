#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::OrderedStore;

#[derive(Debug)]
struct Tagged {
	thread: usize,
	seq: usize,
	drop_counter: Option<Arc<AtomicUsize>>,
}

impl Tagged {
	fn new(thread: usize, seq: usize) -> Arc<Self> {
		Arc::new(Self {
			thread,
			seq,
			drop_counter: None,
		})
	}
}

impl Drop for Tagged {
	fn drop(&mut self) {
		if let Some(counter) = &self.drop_counter {
			counter.fetch_add(1, Ordering::SeqCst);
		}
	}
}

/// Invariant: single-thread registration order MUST be preserved exactly.
pub(crate) fn inv_registration_order_preserved() {
	let store = OrderedStore::<Tagged>::new("test");
	for seq in 0..16 {
		assert_eq!(store.register(Tagged::new(0, seq)), seq);
	}

	let snap = store.snapshot();
	let seqs: Vec<_> = snap.iter().map(|t| t.seq).collect();
	assert_eq!(seqs, (0..16).collect::<Vec<_>>());
}

#[cfg_attr(test, test)]
pub(crate) fn test_registration_order_preserved() {
	inv_registration_order_preserved()
}

/// Invariant: concurrent registrations MUST NOT be lost or duplicated.
///
/// Ten threads register ten entries each; the result holds exactly one hundred entries and each
/// thread's entries appear in that thread's call order.
pub(crate) fn inv_no_lost_updates() {
	const THREADS: usize = 10;
	const PER_THREAD: usize = 10;

	let store = OrderedStore::<Tagged>::new("test");
	std::thread::scope(|s| {
		for thread in 0..THREADS {
			let store = &store;
			s.spawn(move || {
				for seq in 0..PER_THREAD {
					store.register(Tagged::new(thread, seq));
				}
			});
		}
	});

	let snap = store.snapshot();
	assert_eq!(snap.len(), THREADS * PER_THREAD);
	assert_eq!(snap.generation(), (THREADS * PER_THREAD) as u64);

	let mut seen = vec![vec![0usize; PER_THREAD]; THREADS];
	let mut next = vec![0usize; THREADS];
	for entry in &*snap {
		seen[entry.thread][entry.seq] += 1;
		assert_eq!(
			entry.seq, next[entry.thread],
			"entries of thread {} must keep call order",
			entry.thread
		);
		next[entry.thread] += 1;
	}
	assert!(
		seen.iter().flatten().all(|&count| count == 1),
		"every registration must appear exactly once"
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_no_lost_updates() {
	inv_no_lost_updates()
}

/// Invariant: a reader MUST observe either all or none of a batch.
pub(crate) fn inv_no_torn_batches() {
	const BATCH: usize = 5;
	const BATCHES: usize = 40;

	let store = OrderedStore::<Tagged>::new("test");
	let done = AtomicBool::new(false);

	std::thread::scope(|s| {
		let reader = s.spawn(|| {
			let mut observed = 0usize;
			while !done.load(Ordering::Acquire) {
				let snap = store.snapshot();
				assert_eq!(snap.len() % BATCH, 0, "observed a partial batch");
				observed = observed.max(snap.len());
			}
			observed
		});

		for batch in 0..BATCHES {
			store.register_many((0..BATCH).map(|seq| Tagged::new(batch, seq)));
		}
		done.store(true, Ordering::Release);
		let observed = reader.join().expect("reader thread panicked");
		assert!(observed <= BATCH * BATCHES);
	});

	assert_eq!(store.len(), BATCH * BATCHES);
}

#[cfg_attr(test, test)]
pub(crate) fn test_no_torn_batches() {
	inv_no_torn_batches()
}

/// Invariant: registering the same entry twice MUST yield two candidates.
pub(crate) fn inv_duplicates_retained() {
	let store = OrderedStore::<Tagged>::new("test");
	let entry = Tagged::new(0, 7);

	assert_eq!(store.register(Arc::clone(&entry)), 0);
	assert_eq!(store.register(Arc::clone(&entry)), 1);

	let snap = store.snapshot();
	assert_eq!(snap.len(), 2);
	assert!(Arc::ptr_eq(&snap.entries()[0], &entry));
	assert!(Arc::ptr_eq(&snap.entries()[1], &entry));
}

#[cfg_attr(test, test)]
pub(crate) fn test_duplicates_retained() {
	inv_duplicates_retained()
}

/// Invariant: reset MUST clear the store without invalidating snapshots already handed out.
pub(crate) fn inv_reset_keeps_pinned_snapshots_alive() {
	let drop_counter = Arc::new(AtomicUsize::new(0));
	let mut store = OrderedStore::<Tagged>::new("test");
	store.register(Arc::new(Tagged {
		thread: 0,
		seq: 0,
		drop_counter: Some(Arc::clone(&drop_counter)),
	}));

	let pinned = store.snapshot();
	store.reset();

	assert!(store.is_empty());
	assert!(store.snapshot().is_empty());
	assert!(store.snapshot().generation() > pinned.generation());
	assert_eq!(pinned.len(), 1);
	assert_eq!(
		drop_counter.load(Ordering::SeqCst),
		0,
		"entry must stay alive while a snapshot pins it"
	);

	drop(pinned);
	assert_eq!(
		drop_counter.load(Ordering::SeqCst),
		1,
		"entry must be dropped after the last snapshot is released"
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_reset_keeps_pinned_snapshots_alive() {
	inv_reset_keeps_pinned_snapshots_alive()
}
