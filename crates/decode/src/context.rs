//! Decoding cursor contract and the JSON-backed cursor.
//!
//! Predicates receive `&dyn DecodingContext` and can only peek; factories receive
//! `&mut dyn DecodingContext` and may consume. [`DecodingContext::position`] lets dispatch detect a
//! predicate that moved the cursor through interior mutability.

use serde_json::Value;

use crate::error::DecodeError;

/// Cursor over the structured input of one relationship field.
pub trait DecodingContext {
	/// Field path used in diagnostics, e.g. `Post.comments`.
	fn path(&self) -> &str;

	/// Opaque cursor position. Must change whenever the cursor advances.
	fn position(&self) -> usize;

	/// Value at the cursor without consuming it, or `None` once consumed.
	fn peek(&self) -> Option<&Value>;

	/// Consumes the value at the cursor.
	fn take(&mut self) -> Result<Value, DecodeError>;
}

/// Single-value cursor over a decoded JSON tree.
#[derive(Debug, Clone)]
pub struct JsonCursor {
	path: String,
	value: Option<Value>,
}

impl JsonCursor {
	pub fn new(path: impl Into<String>, value: Value) -> Self {
		Self {
			path: path.into(),
			value: Some(value),
		}
	}

	pub fn is_consumed(&self) -> bool {
		self.value.is_none()
	}

	/// Returns the value if nothing consumed it.
	pub fn into_inner(self) -> Option<Value> {
		self.value
	}
}

impl DecodingContext for JsonCursor {
	fn path(&self) -> &str {
		&self.path
	}

	fn position(&self) -> usize {
		usize::from(self.value.is_none())
	}

	fn peek(&self) -> Option<&Value> {
		self.value.as_ref()
	}

	fn take(&mut self) -> Result<Value, DecodeError> {
		self.value.take().ok_or_else(|| DecodeError::Consumed {
			path: self.path.clone(),
		})
	}
}

/// Short shape name of a JSON value for diagnostics.
pub(crate) fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
