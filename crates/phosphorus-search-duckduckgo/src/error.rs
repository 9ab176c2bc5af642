// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the DuckDuckGo client.

use phosphorus_common_http::RetryableError;
use thiserror::Error;

/// Errors that can occur when querying DuckDuckGo.
#[derive(Debug, Error)]
pub enum DuckDuckGoError {
	/// The underlying HTTP client could not be constructed.
	#[error("Failed to build HTTP client: {0}")]
	ClientBuild(#[source] reqwest::Error),

	/// A single attempt timed out.
	#[error("Request timed out")]
	Timeout,

	/// Every attempt in the retry budget timed out.
	#[error("Connection to DuckDuckGo API timed out after multiple attempts.")]
	TimeoutExhausted { attempts: u32 },

	/// Connection refused, DNS failure, TLS failure and other transport
	/// errors.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// DuckDuckGo answered with a non-success status.
	#[error("DuckDuckGo API error: {status} - {message}")]
	Status { status: u16, message: String },
}

impl DuckDuckGoError {
	/// Renders the error the way tool callers expect to receive it.
	pub fn to_result_text(&self) -> String {
		match self {
			DuckDuckGoError::TimeoutExhausted { .. } => format!("Error: {self}"),
			_ => format!("Error occurred during search: {self}"),
		}
	}
}

impl RetryableError for DuckDuckGoError {
	fn is_retryable(&self) -> bool {
		matches!(self, DuckDuckGoError::Timeout)
	}
}

/// Every candidate query in a `gather_information` call failed.
#[derive(Debug, Error)]
#[error("All attempts to gather information failed.")]
pub struct GatherError {
	/// Each attempted query with the error it produced, in order.
	pub failures: Vec<(String, DuckDuckGoError)>,
}
