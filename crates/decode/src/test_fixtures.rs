//! Scripted strategies that record every probe and factory call.

use std::any::Any;
use std::cell::Cell;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::{
	AnyLazyProvider, AnyListProvider, DecodeError, DecodingContext, LazyModelDecoder, LazyProvider,
	LazyState, ListDecoder, ListProvider, ListState, ModelType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
	Probe(&'static str),
	Make(&'static str),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Log(Arc<Mutex<Vec<Event>>>);

impl Log {
	pub(crate) fn push(&self, event: Event) {
		self.0.lock().push(event);
	}

	pub(crate) fn events(&self) -> Vec<Event> {
		self.0.lock().clone()
	}

	pub(crate) fn makes(&self) -> usize {
		self.0
			.lock()
			.iter()
			.filter(|event| matches!(event, Event::Make(_)))
			.count()
	}
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("scripted failure: {0}")]
pub(crate) struct ScriptedError(pub(crate) &'static str);

/// Strategy with a fixed predicate answer.
pub(crate) struct Scripted {
	pub(crate) label: &'static str,
	pub(crate) matches: bool,
	pub(crate) fail: Option<&'static str>,
	pub(crate) log: Log,
}

impl Scripted {
	pub(crate) fn new(label: &'static str, matches: bool, log: &Log) -> Self {
		Self {
			label,
			matches,
			fail: None,
			log: log.clone(),
		}
	}

	pub(crate) fn failing(label: &'static str, message: &'static str, log: &Log) -> Self {
		Self {
			label,
			matches: true,
			fail: Some(message),
			log: log.clone(),
		}
	}

	fn make(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<ScriptedProvider, DecodeError> {
		self.log.push(Event::Make(self.label));
		context.take()?;
		match self.fail {
			Some(message) => Err(DecodeError::custom(ScriptedError(message))),
			None => Ok(ScriptedProvider {
				label: self.label,
				model: *model,
			}),
		}
	}
}

impl ListDecoder for Scripted {
	fn name(&self) -> &str {
		self.label
	}

	fn should_decode(&self, _model: &ModelType, _context: &dyn DecodingContext) -> bool {
		self.log.push(Event::Probe(self.label));
		self.matches
	}

	fn make_list_provider(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyListProvider, DecodeError> {
		Ok(Box::new(self.make(model, context)?))
	}
}

impl LazyModelDecoder for Scripted {
	fn name(&self) -> &str {
		self.label
	}

	fn should_decode(&self, _model: &ModelType, _context: &dyn DecodingContext) -> bool {
		self.log.push(Event::Probe(self.label));
		self.matches
	}

	fn make_provider(
		&self,
		model: &ModelType,
		context: &mut dyn DecodingContext,
	) -> Result<AnyLazyProvider, DecodeError> {
		Ok(Box::new(self.make(model, context)?))
	}
}

/// Provider that remembers which scripted strategy built it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScriptedProvider {
	pub(crate) label: &'static str,
	pub(crate) model: ModelType,
}

impl ListProvider for ScriptedProvider {
	fn model_type(&self) -> ModelType {
		self.model
	}

	fn state(&self) -> ListState<'_> {
		ListState::Loaded(&[])
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl LazyProvider for ScriptedProvider {
	fn model_type(&self) -> ModelType {
		self.model
	}

	fn state(&self) -> LazyState<'_> {
		LazyState::Loaded(None)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Cursor whose `peek` moves it, as a misbehaving streaming reader would.
pub(crate) struct AdvancingCursor {
	position: Cell<usize>,
	value: Value,
}

impl AdvancingCursor {
	pub(crate) fn new(value: Value) -> Self {
		Self {
			position: Cell::new(0),
			value,
		}
	}
}

impl DecodingContext for AdvancingCursor {
	fn path(&self) -> &str {
		"Stream.items"
	}

	fn position(&self) -> usize {
		self.position.get()
	}

	fn peek(&self) -> Option<&Value> {
		self.position.set(self.position.get() + 1);
		Some(&self.value)
	}

	fn take(&mut self) -> Result<Value, DecodeError> {
		Ok(self.value.take())
	}
}

/// Predicate that peeks before answering.
pub(crate) struct Peeking;

impl ListDecoder for Peeking {
	fn name(&self) -> &str {
		"peeking"
	}

	fn should_decode(&self, _model: &ModelType, context: &dyn DecodingContext) -> bool {
		context.peek().is_some_and(Value::is_array)
	}

	fn make_list_provider(
		&self,
		_model: &ModelType,
		_context: &mut dyn DecodingContext,
	) -> Result<AnyListProvider, DecodeError> {
		unreachable!("dispatch must stop before calling this factory")
	}
}
