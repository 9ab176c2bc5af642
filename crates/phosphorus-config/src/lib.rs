// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for Phosphorus.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`PHOSPHORUS_*`)
//!
//! # Usage
//!
//! ```ignore
//! use phosphorus_config::load_config;
//!
//! let config = load_config()?;
//! println!("Searching {}", config.search.base_url);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
	pub search: SearchConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`PHOSPHORUS_*`)
/// 2. Config file (`/etc/phosphorus/config.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<Config, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<Config, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and finalize.
pub fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<Config, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ConfigLayer) -> Result<Config, ConfigError> {
	let search = layer.search.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_search(&search)?;

	info!(
		base_url = %search.base_url,
		min_request_interval_secs = search.min_request_interval_secs,
		request_timeout_secs = search.request_timeout_secs,
		max_attempts = search.max_attempts,
		"Configuration loaded"
	);

	Ok(Config { search, logging })
}

/// Validate cross-field configuration rules.
fn validate_search(search: &SearchConfig) -> Result<(), ConfigError> {
	if search.max_attempts == 0 {
		return Err(ConfigError::Validation(
			"search.max_attempts must be at least 1".to_string(),
		));
	}

	if search.request_timeout_secs == 0 {
		return Err(ConfigError::Validation(
			"search.request_timeout_secs must be at least 1".to_string(),
		));
	}

	let url = url::Url::parse(&search.base_url).map_err(|e| ConfigError::InvalidValue {
		key: "search.base_url".to_string(),
		message: e.to_string(),
	})?;
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::InvalidValue {
			key: "search.base_url".to_string(),
			message: format!("unsupported scheme '{}'", url.scheme()),
		});
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_defaults_are_valid() {
		assert!(validate_search(&SearchConfig::default()).is_ok());
	}

	#[test]
	fn test_zero_attempts_rejected() {
		let search = SearchConfig {
			max_attempts: 0,
			..Default::default()
		};
		let err = validate_search(&search).unwrap_err();
		assert!(err.to_string().contains("max_attempts"));
	}

	#[test]
	fn test_zero_timeout_rejected() {
		let search = SearchConfig {
			request_timeout_secs: 0,
			..Default::default()
		};
		assert!(validate_search(&search).is_err());
	}

	#[test]
	fn test_bad_base_url_rejected() {
		for base_url in ["not a url", "ftp://example.com"] {
			let search = SearchConfig {
				base_url: base_url.to_string(),
				..Default::default()
			};
			assert!(
				matches!(validate_search(&search), Err(ConfigError::InvalidValue { .. })),
				"{base_url}"
			);
		}
	}

	proptest! {
		/// Any positive attempt budget and timeout with a valid URL passes.
		#[test]
		fn positive_budgets_validate(attempts in 1u32..100, timeout in 1u64..600) {
			let search = SearchConfig {
				max_attempts: attempts,
				request_timeout_secs: timeout,
				..Default::default()
			};
			prop_assert!(validate_search(&search).is_ok());
		}
	}
}
