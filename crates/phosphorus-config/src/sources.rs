// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::sections::{LogFormat, LoggingConfigLayer, SearchConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file yields an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/phosphorus/config.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: PHOSPHORUS_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from_lookup(&|name: &str| std::env::var(name).ok())
	}
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(crate) fn load_from_lookup(lookup: Lookup<'_>) -> Result<ConfigLayer, ConfigError> {
	Ok(ConfigLayer {
		search: Some(load_search(lookup)?),
		logging: Some(load_logging(lookup)?),
	})
}

fn env_var(lookup: Lookup<'_>, name: &str) -> Option<String> {
	lookup(name).filter(|s| !s.is_empty())
}

fn env_u32(lookup: Lookup<'_>, name: &str) -> Result<Option<u32>, ConfigError> {
	match env_var(lookup, name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u32 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u64(lookup: Lookup<'_>, name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(lookup, name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_search(lookup: Lookup<'_>) -> Result<SearchConfigLayer, ConfigError> {
	Ok(SearchConfigLayer {
		base_url: env_var(lookup, "PHOSPHORUS_SEARCH_BASE_URL"),
		min_request_interval_secs: env_u64(lookup, "PHOSPHORUS_SEARCH_MIN_REQUEST_INTERVAL_SECS")?,
		request_timeout_secs: env_u64(lookup, "PHOSPHORUS_SEARCH_REQUEST_TIMEOUT_SECS")?,
		max_attempts: env_u32(lookup, "PHOSPHORUS_SEARCH_MAX_ATTEMPTS")?,
		backoff_base_secs: env_u64(lookup, "PHOSPHORUS_SEARCH_BACKOFF_BASE_SECS")?,
	})
}

fn load_logging(lookup: Lookup<'_>) -> Result<LoggingConfigLayer, ConfigError> {
	let format = match env_var(lookup, "PHOSPHORUS_LOG_FORMAT") {
		Some(v) => Some(
			v.parse::<LogFormat>()
				.map_err(|message| ConfigError::InvalidValue {
					key: "PHOSPHORUS_LOG_FORMAT".to_string(),
					message,
				})?,
		),
		None => None,
	};

	Ok(LoggingConfigLayer {
		level: env_var(lookup, "PHOSPHORUS_LOG_LEVEL"),
		format,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name: &str| map.get(name).cloned()
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.search.is_none());
		assert!(layer.logging.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/config.toml").load().unwrap();
		assert!(layer.search.is_none());
	}

	#[test]
	fn test_env_layer_reads_search_fields() {
		let lookup = lookup_from(&[
			("PHOSPHORUS_SEARCH_BASE_URL", "http://localhost:9000"),
			("PHOSPHORUS_SEARCH_MIN_REQUEST_INTERVAL_SECS", "0"),
			("PHOSPHORUS_SEARCH_MAX_ATTEMPTS", "5"),
			("PHOSPHORUS_LOG_FORMAT", "json"),
		]);
		let layer = load_from_lookup(&lookup).unwrap();

		let search = layer.search.unwrap();
		assert_eq!(search.base_url.as_deref(), Some("http://localhost:9000"));
		assert_eq!(search.min_request_interval_secs, Some(0));
		assert_eq!(search.max_attempts, Some(5));
		assert!(search.request_timeout_secs.is_none());
		assert_eq!(layer.logging.unwrap().format, Some(LogFormat::Json));
	}

	#[test]
	fn test_env_empty_values_are_ignored() {
		let lookup = lookup_from(&[("PHOSPHORUS_SEARCH_BASE_URL", "")]);
		let layer = load_from_lookup(&lookup).unwrap();
		assert!(layer.search.unwrap().base_url.is_none());
	}

	#[test]
	fn test_env_invalid_number_is_rejected() {
		let lookup = lookup_from(&[("PHOSPHORUS_SEARCH_MAX_ATTEMPTS", "three")]);
		let err = load_from_lookup(&lookup).unwrap_err();
		assert!(matches!(
			err,
			ConfigError::InvalidValue { ref key, .. } if key == "PHOSPHORUS_SEARCH_MAX_ATTEMPTS"
		));
	}

	#[test]
	fn test_env_invalid_log_format_is_rejected() {
		let lookup = lookup_from(&[("PHOSPHORUS_LOG_FORMAT", "xml")]);
		assert!(load_from_lookup(&lookup).is_err());
	}
}
