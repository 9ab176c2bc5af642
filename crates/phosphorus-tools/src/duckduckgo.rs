// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! DuckDuckGo search exposed as an agent tool.
//!
//! Agent frameworks call tools with loosely shaped arguments and expect a
//! string back, errors included. This adapter accepts a bare JSON string or
//! an object carrying `query` (or `q`), and always answers with a string.

use async_trait::async_trait;
use phosphorus_search_duckduckgo::DuckDuckGoClient;
use serde_json::Value;

use crate::error::ToolError;
use crate::registry::Tool;

/// Result returned when the arguments do not contain a query string.
pub const INVALID_INPUT: &str = "Invalid input. Please provide a search query as a string.";

const NAME: &str = "duckduckgo_search";
const DESCRIPTION: &str = "A wrapper around DuckDuckGo Search. Useful for when you need to answer questions about current events. Input should be a search query.";

pub struct DuckDuckGoSearchTool {
	client: DuckDuckGoClient,
}

impl DuckDuckGoSearchTool {
	pub fn new(client: DuckDuckGoClient) -> Self {
		Self { client }
	}

	pub fn client(&self) -> &DuckDuckGoClient {
		&self.client
	}

	/// Runs a single query and returns the tool result string.
	pub async fn run(&self, query: &str) -> String {
		self.client.search_text(query).await
	}

	/// Tries each query in order and returns the first non-error result.
	pub async fn gather_information<I, S>(&self, queries: I) -> String
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.client.gather_information_text(queries).await
	}
}

/// Pulls the query out of a positional string or a `query`/`q` keyword.
fn extract_query(args: &Value) -> Result<&str, ToolError> {
	if let Some(query) = args.as_str() {
		return Ok(query);
	}

	["query", "q"]
		.iter()
		.find_map(|key| args.get(key).and_then(Value::as_str))
		.ok_or_else(|| ToolError::InvalidArguments("expected a search query string".to_string()))
}

#[async_trait]
impl Tool for DuckDuckGoSearchTool {
	fn name(&self) -> &str {
		NAME
	}

	fn description(&self) -> &str {
		DESCRIPTION
	}

	fn input_schema(&self) -> Value {
		serde_json::json!({
				"type": "object",
				"properties": {
						"query": {
								"type": "string",
								"description": "Search query string."
						}
				},
				"required": ["query"]
		})
	}

	async fn invoke(&self, args: Value) -> Result<Value, ToolError> {
		let query = match extract_query(&args) {
			Ok(query) => query,
			Err(e) => {
				tracing::warn!(error = %e, "duckduckgo_search: rejecting arguments");
				return Ok(Value::String(INVALID_INPUT.to_string()));
			}
		};

		tracing::debug!(query = %query, "duckduckgo_search: running query");
		Ok(Value::String(self.run(query).await))
	}
}
