// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! DuckDuckGo search client configuration section.

use std::time::Duration;

use phosphorus_common_http::RetryConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com";
pub const DEFAULT_MIN_REQUEST_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_SECS: u64 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchConfigLayer {
	pub base_url: Option<String>,
	pub min_request_interval_secs: Option<u64>,
	pub request_timeout_secs: Option<u64>,
	pub max_attempts: Option<u32>,
	pub backoff_base_secs: Option<u64>,
}

impl SearchConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.min_request_interval_secs.is_some() {
			self.min_request_interval_secs = other.min_request_interval_secs;
		}
		if other.request_timeout_secs.is_some() {
			self.request_timeout_secs = other.request_timeout_secs;
		}
		if other.max_attempts.is_some() {
			self.max_attempts = other.max_attempts;
		}
		if other.backoff_base_secs.is_some() {
			self.backoff_base_secs = other.backoff_base_secs;
		}
	}

	pub fn finalize(self) -> SearchConfig {
		SearchConfig {
			base_url: self
				.base_url
				.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			min_request_interval_secs: self
				.min_request_interval_secs
				.unwrap_or(DEFAULT_MIN_REQUEST_INTERVAL_SECS),
			request_timeout_secs: self
				.request_timeout_secs
				.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
			max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
			backoff_base_secs: self.backoff_base_secs.unwrap_or(DEFAULT_BACKOFF_BASE_SECS),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
	pub base_url: String,
	pub min_request_interval_secs: u64,
	pub request_timeout_secs: u64,
	pub max_attempts: u32,
	pub backoff_base_secs: u64,
}

impl Default for SearchConfig {
	fn default() -> Self {
		SearchConfigLayer::default().finalize()
	}
}

impl SearchConfig {
	pub fn min_request_interval(&self) -> Duration {
		Duration::from_secs(self.min_request_interval_secs)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	/// Retry schedule: `backoff_base_secs * 2^n` between attempts, no jitter.
	pub fn retry_config(&self) -> RetryConfig {
		RetryConfig {
			max_attempts: self.max_attempts,
			base_delay: Duration::from_secs(self.backoff_base_secs),
			..RetryConfig::default()
		}
	}
}
