// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! DuckDuckGo Instant Answer API client implementation.

use std::sync::Arc;
use std::time::Duration;

use phosphorus_common_http::{retry, RetryConfig, Throttle};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, instrument, trace, warn};

use crate::error::DuckDuckGoError;
use crate::types::SearchAnswer;

pub const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(2);

/// Client for the DuckDuckGo Instant Answer API.
///
/// Each client owns one connection pool and one throttle. Clones share both,
/// so the minimum request interval holds across every clone.
#[derive(Debug, Clone)]
pub struct DuckDuckGoClient {
	http_client: Client,
	base_url: String,
	request_timeout: Duration,
	retry_config: RetryConfig,
	throttle: Arc<Throttle>,
}

impl DuckDuckGoClient {
	/// Creates a client with the default endpoint, a 10 second per-attempt
	/// timeout, a 2 second minimum interval and three attempts.
	pub fn new() -> Result<Self, DuckDuckGoError> {
		let http_client = phosphorus_common_http::builder()
			.build()
			.map_err(DuckDuckGoError::ClientBuild)?;

		Ok(Self {
			http_client,
			base_url: DEFAULT_BASE_URL.to_string(),
			request_timeout: REQUEST_TIMEOUT,
			retry_config: RetryConfig::default(),
			throttle: Arc::new(Throttle::new(MIN_REQUEST_INTERVAL)),
		})
	}

	/// Sets a custom base URL for the API (useful for testing).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Sets a custom retry configuration.
	pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
		self.retry_config = config;
		self
	}

	/// Sets the timeout applied to each individual attempt.
	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Replaces the throttle with a fresh one using `interval`.
	pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
		self.throttle = Arc::new(Throttle::new(interval));
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn retry_config(&self) -> &RetryConfig {
		&self.retry_config
	}

	pub fn request_timeout(&self) -> Duration {
		self.request_timeout
	}

	pub fn min_request_interval(&self) -> Duration {
		self.throttle.min_interval()
	}

	/// Looks up `query`, waiting out the minimum interval first and retrying
	/// timed-out attempts with exponential backoff.
	///
	/// The query is sent as-is. Only timeouts are retried; any other failure
	/// ends the call after one attempt.
	#[instrument(skip(self), fields(base_url = %self.base_url))]
	pub async fn search(&self, query: &str) -> Result<SearchAnswer, DuckDuckGoError> {
		let throttle = self.throttle.acquire().await;

		match retry(&self.retry_config, || self.search_inner(query)).await {
			Ok(answer) => {
				throttle.mark();
				Ok(answer)
			}
			Err(DuckDuckGoError::Timeout) => {
				error!(
					attempts = self.retry_config.max_attempts,
					"DuckDuckGo request timed out on every attempt"
				);
				Err(DuckDuckGoError::TimeoutExhausted {
					attempts: self.retry_config.max_attempts,
				})
			}
			Err(e) => Err(e),
		}
	}

	/// Same as [`search`](Self::search), rendered as a tool result string.
	pub async fn search_text(&self, query: &str) -> String {
		match self.search(query).await {
			Ok(answer) => answer.into_text(),
			Err(e) => e.to_result_text(),
		}
	}

	async fn search_inner(&self, query: &str) -> Result<SearchAnswer, DuckDuckGoError> {
		debug!(url = %self.base_url, "Sending search request to DuckDuckGo");
		trace!(query = %query, "Search parameters");

		let response = self
			.http_client
			.get(&self.base_url)
			.query(&[
				("q", query),
				("format", "json"),
				("no_html", "1"),
				("no_redirect", "1"),
			])
			.timeout(self.request_timeout)
			.send()
			.await
			.map_err(classify_transport_error)?;

		let status = response.status();
		debug!(status = %status, "Received response from DuckDuckGo");

		if !status.is_success() {
			let status_code = status.as_u16();
			let body = response.text().await.unwrap_or_default();
			error!(status = status_code, body = %body, "DuckDuckGo API error");
			return Err(DuckDuckGoError::Status {
				status: status_code,
				message: body,
			});
		}

		let body = response.text().await.map_err(classify_transport_error)?;
		trace!(body = %body, "Response body");

		let parsed: Value = match serde_json::from_str(&body) {
			Ok(parsed) => parsed,
			Err(e) => {
				warn!(error = %e, "Unparseable DuckDuckGo response, treating as empty");
				Value::Null
			}
		};

		let answer = extract_answer(&parsed);
		debug!(
			no_results = answer.is_no_results(),
			"Search completed successfully"
		);
		Ok(answer)
	}
}

fn classify_transport_error(e: reqwest::Error) -> DuckDuckGoError {
	if e.is_timeout() {
		warn!("Request timed out");
		return DuckDuckGoError::Timeout;
	}
	error!(error = %e, "Network error during DuckDuckGo request");
	DuckDuckGoError::Network(e)
}

/// Abstract first, then the first related topic, then the sentinel.
///
/// Each field is read on its own, so an off-shape `RelatedTopics` never hides
/// a usable abstract. Fields of the wrong type count as absent.
fn extract_answer(response: &Value) -> SearchAnswer {
	if let Some(text) = non_empty_str(response.get("Abstract")) {
		return SearchAnswer::Abstract(text.to_string());
	}

	let first_topic = response
		.get("RelatedTopics")
		.and_then(Value::as_array)
		.and_then(|topics| topics.first());

	non_empty_str(first_topic.and_then(|topic| topic.get("Text")))
		.map(|text| SearchAnswer::RelatedTopic(text.to_string()))
		.unwrap_or(SearchAnswer::NoResults)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
	value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
