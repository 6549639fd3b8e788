//! Ordered first-match dispatch over a registration snapshot.
//!
//! # Invariants
//!
//! - Candidates are probed in registration order and probing stops at the first match
//!   (see `invariants::test_first_match_wins`).
//! - At most one factory runs per call (see `invariants::test_at_most_one_factory`).
//! - Factory errors are returned unchanged (see `invariants::test_factory_error_propagates`).
//! - A predicate that moves the cursor aborts dispatch (see `invariants::test_cursor_advance_detected`).

use linkage_store::Snapshot;

use crate::capability::Strategy;
use crate::context::DecodingContext;
use crate::error::DecodeError;
use crate::model::ModelType;

/// Probes `candidates` in order and runs the factory of the first match.
///
/// Returns `Ok(None)` when nothing matched. The snapshot is immutable, so registrations that
/// land during the pass are not probed.
pub(crate) fn dispatch<S>(
	candidates: &Snapshot<S>,
	model: &ModelType,
	context: &mut dyn DecodingContext,
) -> Result<Option<S::Provider>, DecodeError>
where
	S: Strategy + ?Sized,
{
	for (ordinal, candidate) in candidates.iter().enumerate() {
		let before = context.position();
		let matched = candidate.probe(model, &*context);
		if context.position() != before {
			tracing::warn!(
				family = S::FAMILY,
				decoder = candidate.name(),
				path = context.path(),
				"predicate advanced the decoding cursor"
			);
			return Err(DecodeError::CursorAdvanced {
				decoder: candidate.name().to_owned(),
				path: context.path().to_owned(),
			});
		}

		if !matched {
			tracing::trace!(
				family = S::FAMILY,
				decoder = candidate.name(),
				ordinal,
				model = model.name(),
				"decoder declined"
			);
			continue;
		}

		tracing::debug!(
			family = S::FAMILY,
			decoder = candidate.name(),
			ordinal,
			model = model.name(),
			path = context.path(),
			"decoder selected"
		);
		return candidate.provide(model, context).map(Some);
	}

	tracing::debug!(
		family = S::FAMILY,
		candidates = candidates.len(),
		model = model.name(),
		path = context.path(),
		"no decoder matched"
	);
	Ok(None)
}
