#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;

use crate::builtins::ArrayListProvider;
use crate::test_fixtures::{
	AdvancingCursor, Event, Log, Peeking, Scripted, ScriptedError, ScriptedProvider,
};
use crate::{DecodeError, DecoderRegistry, JsonCursor, LazyModelDecoder, ModelType};

const COMMENT: ModelType = ModelType::named("Comment");

/// Invariant: dispatch MUST probe in registration order and stop at the first match.
///
/// `[A(false), B(true), C(true)]` probes A, probes B, runs B's factory and never touches C.
pub(crate) fn inv_first_match_wins() {
	let log = Log::default();
	let registry = DecoderRegistry::new();
	registry.register_list_decoder(Scripted::new("A", false, &log));
	registry.register_list_decoder(Scripted::new("B", true, &log));
	registry.register_list_decoder(Scripted::new("C", true, &log));

	let mut cursor = JsonCursor::new("Post.comments", json!([]));
	let provider = registry
		.dispatch_list(&COMMENT, &mut cursor)
		.expect("B's factory succeeds")
		.expect("B matches");

	assert_eq!(
		log.events(),
		vec![Event::Probe("A"), Event::Probe("B"), Event::Make("B")]
	);
	let provider = provider
		.downcast_ref::<ScriptedProvider>()
		.expect("scripted provider");
	assert_eq!(provider.label, "B");
	assert_eq!(provider.model, COMMENT);
}

#[cfg_attr(test, test)]
pub(crate) fn test_first_match_wins() {
	inv_first_match_wins()
}

/// Invariant: dispatch MUST run at most one factory, however many predicates match.
pub(crate) fn inv_at_most_one_factory() {
	let log = Log::default();
	let registry = DecoderRegistry::new();
	for label in ["A", "B", "C", "D"] {
		registry.register_lazy_decoder(Scripted::new(label, true, &log));
	}

	let mut cursor = JsonCursor::new("Comment.post", json!({}));
	registry
		.dispatch_lazy(&COMMENT, &mut cursor)
		.expect("factory succeeds")
		.expect("A matches");

	assert_eq!(log.makes(), 1);
	assert_eq!(log.events(), vec![Event::Probe("A"), Event::Make("A")]);
}

#[cfg_attr(test, test)]
pub(crate) fn test_at_most_one_factory() {
	inv_at_most_one_factory()
}

/// Invariant: an empty registry MUST report no match without running any factory.
pub(crate) fn inv_no_match_after_reset() {
	let log = Log::default();
	let mut registry = DecoderRegistry::new();
	registry.register_list_decoder(Scripted::new("A", true, &log));
	registry.register_lazy_decoder(Scripted::new("B", true, &log));
	registry.reset();

	assert!(registry.list_decoders().is_empty());
	assert!(registry.lazy_decoders().is_empty());

	let mut cursor = JsonCursor::new("Post.comments", json!([]));
	assert!(
		registry
			.dispatch_list(&COMMENT, &mut cursor)
			.expect("no match is not an error")
			.is_none()
	);
	assert!(
		registry
			.dispatch_lazy(&COMMENT, &mut cursor)
			.expect("no match is not an error")
			.is_none()
	);
	assert!(log.events().is_empty());
	assert!(!cursor.is_consumed());

	registry.register_list_decoder(Scripted::new("C", true, &log));
	assert!(
		registry
			.dispatch_list(&COMMENT, &mut cursor)
			.expect("C's factory succeeds")
			.is_some()
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_no_match_after_reset() {
	inv_no_match_after_reset()
}

/// Invariant: a factory error MUST reach the caller unchanged, with no retry.
pub(crate) fn inv_factory_error_propagates() {
	let log = Log::default();
	let registry = DecoderRegistry::new();
	registry.register_list_decoder(Scripted::failing("A", "bad payload", &log));
	registry.register_list_decoder(Scripted::new("B", true, &log));

	let mut cursor = JsonCursor::new("Post.comments", json!([]));
	let err = registry
		.dispatch_list(&COMMENT, &mut cursor)
		.expect_err("A's factory fails");

	let inner = match err {
		DecodeError::Custom(inner) => inner,
		other => panic!("expected the factory's error, got {other:?}"),
	};
	assert_eq!(
		inner.downcast_ref::<ScriptedError>(),
		Some(&ScriptedError("bad payload"))
	);
	assert_eq!(log.events(), vec![Event::Probe("A"), Event::Make("A")]);
}

#[cfg_attr(test, test)]
pub(crate) fn test_factory_error_propagates() {
	inv_factory_error_propagates()
}

/// Invariant: a predicate that moves the cursor MUST abort dispatch before later candidates run.
pub(crate) fn inv_cursor_advance_detected() {
	let log = Log::default();
	let registry = DecoderRegistry::new();
	registry.register_list_decoder(Peeking);
	registry.register_list_decoder(Scripted::new("B", true, &log));

	let mut cursor = AdvancingCursor::new(json!([1]));
	let err = registry
		.dispatch_list(&COMMENT, &mut cursor)
		.expect_err("advancing peek is detected");

	assert!(matches!(
		err,
		DecodeError::CursorAdvanced { ref decoder, ref path }
			if decoder == "peeking" && path == "Stream.items"
	));
	assert!(log.events().is_empty(), "later candidates must not be probed");
}

#[cfg_attr(test, test)]
pub(crate) fn test_cursor_advance_detected() {
	inv_cursor_advance_detected()
}

/// Invariant: duplicate registrations MUST be probed as separate candidates, earliest first.
pub(crate) fn inv_duplicates_probe_twice() {
	let log = Log::default();
	let registry = DecoderRegistry::new();
	let shared: Arc<dyn LazyModelDecoder> = Arc::new(Scripted::new("dup", false, &log));
	registry.register_lazy_decoder_arc(Arc::clone(&shared));
	registry.register_lazy_decoder_arc(shared);

	let mut cursor = JsonCursor::new("Comment.post", json!(null));
	assert!(
		registry
			.dispatch_lazy(&COMMENT, &mut cursor)
			.expect("no match is not an error")
			.is_none()
	);
	assert_eq!(
		log.events(),
		vec![Event::Probe("dup"), Event::Probe("dup")]
	);
}

#[cfg_attr(test, test)]
pub(crate) fn test_duplicates_probe_twice() {
	inv_duplicates_probe_twice()
}

/// Invariant: dispatch MUST observe a coherent snapshot while registrations land concurrently.
///
/// Readers keep dispatching arrays while a writer appends strategies behind the builtins; every
/// dispatch still selects the builtin array strategy and the registry ends with every registration.
pub(crate) fn inv_dispatch_during_registration() {
	const LATE: usize = 64;
	const READERS: usize = 4;

	let log = Log::default();
	let registry = DecoderRegistry::with_builtins();
	let builtin_lists = registry.list_decoders().len();

	std::thread::scope(|s| {
		for _ in 0..READERS {
			s.spawn(|| {
				let mut last_len = 0;
				for i in 0..LATE {
					let snapshot_len = registry.list_decoders().len();
					assert!(snapshot_len >= last_len, "snapshots never shrink");
					last_len = snapshot_len;

					let mut cursor = JsonCursor::new("Post.comments", json!([i]));
					let provider = registry
						.dispatch_list(&COMMENT, &mut cursor)
						.expect("array decodes")
						.expect("array strategy matches");
					let provider = provider
						.downcast_ref::<ArrayListProvider>()
						.expect("array provider");
					assert_eq!(provider.elements(), &[json!(i)]);
				}
			});
		}

		s.spawn(|| {
			for _ in 0..LATE {
				registry.register_list_decoder(Scripted::new("late", true, &log));
			}
		});
	});

	let decoders = registry.list_decoders();
	assert_eq!(decoders.len(), builtin_lists + LATE);
	assert!(decoders.iter().skip(builtin_lists).all(|d| d.name() == "late"));
	assert_eq!(log.makes(), 0, "late strategies sit behind the builtins");
}

#[cfg_attr(test, test)]
pub(crate) fn test_dispatch_during_registration() {
	inv_dispatch_during_registration()
}

/// Invariant: concurrent registration from many threads MUST keep every entry.
pub(crate) fn inv_concurrent_registration() {
	const THREADS: usize = 10;
	const PER_THREAD: usize = 10;
	const LABELS: [&str; THREADS] = ["t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8", "t9"];

	let log = Log::default();
	let registry = DecoderRegistry::new();
	std::thread::scope(|s| {
		for label in LABELS {
			let registry = &registry;
			let log = &log;
			s.spawn(move || {
				for _ in 0..PER_THREAD {
					registry.register_list_decoder(Scripted::new(label, false, log));
				}
			});
		}
	});

	let decoders = registry.list_decoders();
	assert_eq!(decoders.len(), THREADS * PER_THREAD);
	for label in LABELS {
		assert_eq!(
			decoders.iter().filter(|d| d.name() == label).count(),
			PER_THREAD
		);
	}
}

#[cfg_attr(test, test)]
pub(crate) fn test_concurrent_registration() {
	inv_concurrent_registration()
}
