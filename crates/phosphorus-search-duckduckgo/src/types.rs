// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Types for DuckDuckGo search results.

use std::fmt;

/// Sentinel returned when the endpoint yields no usable content.
pub const NO_RESULTS: &str = "No results found.";

/// Returned by the text form of `gather_information` when every query fails.
pub const GATHER_FAILED: &str = "All attempts to gather information failed.";

/// Prefix shared by every error string produced at the text boundary.
const ERROR_MARKER: &str = "Error";

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAnswer {
	/// The endpoint's non-empty `Abstract` field.
	Abstract(String),
	/// `Text` of the first `RelatedTopics` entry.
	RelatedTopic(String),
	/// Nothing usable in the response.
	NoResults,
}

impl SearchAnswer {
	pub fn text(&self) -> &str {
		match self {
			SearchAnswer::Abstract(text) | SearchAnswer::RelatedTopic(text) => text,
			SearchAnswer::NoResults => NO_RESULTS,
		}
	}

	pub fn is_no_results(&self) -> bool {
		matches!(self, SearchAnswer::NoResults)
	}

	pub fn into_text(self) -> String {
		match self {
			SearchAnswer::Abstract(text) | SearchAnswer::RelatedTopic(text) => text,
			SearchAnswer::NoResults => NO_RESULTS.to_string(),
		}
	}
}

impl fmt::Display for SearchAnswer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.text())
	}
}

/// Whether a string produced by the text boundary reports a failed lookup.
pub fn is_error_text(text: &str) -> bool {
	text.starts_with(ERROR_MARKER)
}
