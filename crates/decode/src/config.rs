//! Registry configuration loaded from TOML.
//!
//! ```toml
//! builtins = true
//! no_match = "keep-raw"
//!
//! [plugins]
//! enabled = true
//! disabled = ["legacy-associations"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// How record decoding treats a relationship field no strategy matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoMatchPolicy {
	/// Hand the undecoded value back to the caller.
	#[default]
	KeepRaw,
	/// Fail the record with [`crate::DecodeError::NoStrategy`].
	Error,
}

/// Plugin installation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
	/// Install plugins submitted through `inventory`.
	pub enabled: bool,
	/// Names of plugins to skip.
	pub disabled: Vec<String>,
}

impl Default for PluginConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			disabled: Vec::new(),
		}
	}
}

/// Settings for building a [`crate::DecoderRegistry`] and decoding records with it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeConfig {
	/// Install the builtin strategies ahead of plugins.
	pub builtins: bool,
	pub plugins: PluginConfig,
	pub no_match: NoMatchPolicy,
}

impl Default for DecodeConfig {
	fn default() -> Self {
		Self {
			builtins: true,
			plugins: PluginConfig::default(),
			no_match: NoMatchPolicy::default(),
		}
	}
}

impl DecodeConfig {
	/// Parses a configuration document. Missing keys take their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses a configuration file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		tracing::debug!(path = %path.display(), "loading decode config");
		Self::from_toml_str(&input)
	}
}
