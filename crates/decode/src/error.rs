//! Error types for relationship decoding and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while producing a relationship provider.
///
/// Errors returned by a winning strategy reach the dispatch caller unchanged.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The value at the cursor has a different shape than the strategy expects.
	#[error("{path}: expected {expected}, found {found}")]
	UnexpectedShape {
		/// Field path of the cursor.
		path: String,
		/// Shape the strategy needed.
		expected: &'static str,
		/// Shape that was present.
		found: &'static str,
	},

	/// The payload could not be deserialized into the strategy's metadata.
	#[error("{path}: {source}")]
	Json {
		/// Field path of the cursor.
		path: String,
		/// The underlying deserialization error.
		#[source]
		source: serde_json::Error,
	},

	/// A factory tried to read a cursor that was already consumed.
	#[error("{path}: decoding cursor already consumed")]
	Consumed {
		/// Field path of the cursor.
		path: String,
	},

	/// A predicate moved the cursor while probing.
	#[error("decoder '{decoder}' advanced the cursor while probing {path}")]
	CursorAdvanced {
		/// Name of the offending decoder.
		decoder: String,
		/// Field path of the cursor.
		path: String,
	},

	/// No registered strategy matched and the record policy requires one.
	#[error("{path}: no decode strategy matched model '{model}'")]
	NoStrategy {
		/// Field path of the cursor.
		path: String,
		/// Name of the relationship's target model.
		model: &'static str,
	},

	/// A strategy-specific failure.
	#[error(transparent)]
	Custom(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl DecodeError {
	/// Wraps a strategy-specific error.
	pub fn custom(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
		Self::Custom(error.into())
	}
}

/// Errors that can occur when loading [`crate::DecodeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or mapping it onto the config schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}
