// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::Write;

use phosphorus_config::{
	load_from_sources, ConfigError, ConfigLayer, ConfigSource, DefaultsSource, LogFormat,
	LoggingConfigLayer, Precedence, SearchConfigLayer, TomlSource,
};

struct FixedSource(ConfigLayer);

impl ConfigSource for FixedSource {
	fn name(&self) -> &'static str {
		"fixed"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(self.0.clone())
	}
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(contents.as_bytes()).unwrap();
	file
}

#[test]
fn toml_file_overrides_defaults() {
	let file = write_config(
		r#"
[search]
base_url = "http://127.0.0.1:8080"
min_request_interval_secs = 5

[logging]
level = "debug"
format = "compact"
"#,
	);

	let config = load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(file.path())),
	])
	.unwrap();

	assert_eq!(config.search.base_url, "http://127.0.0.1:8080");
	assert_eq!(config.search.min_request_interval_secs, 5);
	assert_eq!(config.search.request_timeout_secs, 10);
	assert_eq!(config.search.max_attempts, 3);
	assert_eq!(config.logging.level, "debug");
	assert_eq!(config.logging.format, LogFormat::Compact);
}

#[test]
fn higher_precedence_wins_regardless_of_order() {
	let file = write_config("[search]\nmax_attempts = 4\nrequest_timeout_secs = 20\n");

	let overlay = ConfigLayer {
		search: Some(SearchConfigLayer {
			max_attempts: Some(6),
			..Default::default()
		}),
		logging: Some(LoggingConfigLayer {
			level: Some("trace".to_string()),
			format: None,
		}),
	};

	let config = load_from_sources(vec![
		Box::new(FixedSource(overlay)),
		Box::new(TomlSource::new(file.path())),
		Box::new(DefaultsSource),
	])
	.unwrap();

	assert_eq!(config.search.max_attempts, 6);
	assert_eq!(config.search.request_timeout_secs, 20);
	assert_eq!(config.logging.level, "trace");
}

#[test]
fn malformed_toml_is_reported_with_path() {
	let file = write_config("[search\nbase_url = ");

	let err = load_from_sources(vec![Box::new(TomlSource::new(file.path()))]).unwrap_err();

	match err {
		ConfigError::TomlParse { path, .. } => assert_eq!(path, file.path()),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn invalid_values_fail_validation() {
	let file = write_config("[search]\nmax_attempts = 0\n");

	let err = load_from_sources(vec![Box::new(TomlSource::new(file.path()))]).unwrap_err();

	assert!(matches!(err, ConfigError::Validation(_)));
}
