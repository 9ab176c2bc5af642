// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Ordered fallback across several candidate queries.

use tracing::{debug, info, instrument, warn};

use crate::client::DuckDuckGoClient;
use crate::error::GatherError;
use crate::types::{SearchAnswer, GATHER_FAILED};

/// The first successful answer and the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatheredAnswer {
	pub query: String,
	pub answer: SearchAnswer,
}

impl DuckDuckGoClient {
	/// Tries each query in order and returns the first one that does not
	/// fail. Later queries are never sent once one succeeds.
	///
	/// A `NoResults` answer counts as a success.
	#[instrument(skip_all)]
	pub async fn gather_information<I, S>(&self, queries: I) -> Result<GatheredAnswer, GatherError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut failures = Vec::new();

		for query in queries {
			let query = query.as_ref();
			debug!(query = %query, "gathering information");

			match self.search(query).await {
				Ok(answer) => {
					info!(
						query = %query,
						failed_before = failures.len(),
						"gathered information"
					);
					return Ok(GatheredAnswer {
						query: query.to_string(),
						answer,
					});
				}
				Err(e) => {
					warn!(query = %query, error = %e, "query failed, trying next candidate");
					failures.push((query.to_string(), e));
				}
			}
		}

		warn!(attempted = failures.len(), "all candidate queries failed");
		Err(GatherError { failures })
	}

	/// Same as [`gather_information`](Self::gather_information), rendered as
	/// a tool result string.
	pub async fn gather_information_text<I, S>(&self, queries: I) -> String
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		match self.gather_information(queries).await {
			Ok(gathered) => gathered.answer.into_text(),
			Err(_) => GATHER_FAILED.to_string(),
		}
	}
}
