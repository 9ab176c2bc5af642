// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Phosphorus CLI - DuckDuckGo lookups for agent workflows
//!
//! Runs the same search tool that agents are given, from the command line:
//! single queries, ordered fallback across several queries, and a dump of the
//! tool definitions advertised to the LLM.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use phosphorus_config::{Config, LogFormat, LoggingConfig};
use phosphorus_search_duckduckgo::{DuckDuckGoClient, GATHER_FAILED};
use phosphorus_tools::{DuckDuckGoSearchTool, ToolRegistry};

/// Phosphorus - rate-limited DuckDuckGo search for agents
#[derive(Parser, Debug)]
#[command(name = "phosphorus", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level or filter directive (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Look up a single query
	Search {
		/// Search query, passed to the endpoint unchanged
		query: String,
	},
	/// Try each query in order and print the first successful answer
	Gather {
		#[arg(required = true)]
		queries: Vec<String>,
	},
	/// Print the registered tool definitions as JSON
	Tools,
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(&logging.level))
		.unwrap_or_else(|_| EnvFilter::new("info"));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn load_config(args: &Args) -> Result<Config> {
	let mut config = match &args.config {
		Some(path) => phosphorus_config::load_config_with_file(path),
		None => phosphorus_config::load_config(),
	}
	.context("failed to load configuration")?;

	if let Some(level) = &args.log_level {
		config.logging.level = level.clone();
	}
	if args.json_logs {
		config.logging.format = LogFormat::Json;
	}

	Ok(config)
}

fn build_client(config: &Config) -> Result<DuckDuckGoClient> {
	let search = &config.search;
	let client = DuckDuckGoClient::new()
		.context("failed to create DuckDuckGo client")?
		.with_base_url(&search.base_url)
		.with_request_timeout(search.request_timeout())
		.with_min_request_interval(search.min_request_interval())
		.with_retry_config(search.retry_config());
	Ok(client)
}

fn build_registry(client: &DuckDuckGoClient) -> ToolRegistry {
	let mut registry = ToolRegistry::new();
	registry.register(Box::new(DuckDuckGoSearchTool::new(client.clone())));
	registry
}

/// Result text for one query, and whether the lookup failed.
async fn run_search(client: &DuckDuckGoClient, query: &str) -> (String, bool) {
	match client.search(query).await {
		Ok(answer) => (answer.into_text(), false),
		Err(e) => (e.to_result_text(), true),
	}
}

fn report(text: &str, failed: bool) -> ExitCode {
	println!("{text}");
	if failed {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();

	let config = load_config(&args)?;
	init_tracing(&config.logging);

	info!(base_url = %config.search.base_url, "starting phosphorus");

	let client = build_client(&config)?;
	let registry = build_registry(&client);

	match &args.command {
		Command::Search { query } => {
			let (text, failed) = run_search(&client, query).await;
			Ok(report(&text, failed))
		}
		Command::Gather { queries } => {
			debug!(count = queries.len(), "gathering across candidate queries");
			let tool = DuckDuckGoSearchTool::new(client);
			let text = tool.gather_information(queries).await;
			let failed = text == GATHER_FAILED;
			Ok(report(&text, failed))
		}
		Command::Tools => {
			let definitions = registry.definitions();
			println!(
				"{}",
				serde_json::to_string_pretty(&definitions).context("failed to encode tools")?
			);
			Ok(ExitCode::SUCCESS)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use std::time::Duration;
	use wiremock::matchers::method;
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn client_for(server: &MockServer) -> DuckDuckGoClient {
		DuckDuckGoClient::new()
			.unwrap()
			.with_base_url(server.uri())
			.with_min_request_interval(Duration::ZERO)
	}

	#[test]
	fn cli_definition_is_valid() {
		Args::command().debug_assert();
	}

	#[test]
	fn parses_search() {
		let args = Args::try_parse_from(["phosphorus", "search", "rust language"]).unwrap();
		assert!(matches!(args.command, Command::Search { ref query } if query == "rust language"));
	}

	#[test]
	fn gather_requires_a_query() {
		assert!(Args::try_parse_from(["phosphorus", "gather"]).is_err());

		let args = Args::try_parse_from(["phosphorus", "gather", "a", "b"]).unwrap();
		match args.command {
			Command::Gather { queries } => assert_eq!(queries, vec!["a", "b"]),
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn global_flags_parse() {
		let args = Args::try_parse_from([
			"phosphorus",
			"--config",
			"/tmp/phosphorus.toml",
			"--log-level",
			"debug",
			"--json-logs",
			"tools",
		])
		.unwrap();
		assert_eq!(args.config, Some(PathBuf::from("/tmp/phosphorus.toml")));
		assert_eq!(args.log_level.as_deref(), Some("debug"));
		assert!(args.json_logs);
	}

	#[test]
	fn client_follows_config() {
		let mut config = Config::default();
		config.search.base_url = "http://127.0.0.1:4000".to_string();
		config.search.max_attempts = 5;

		let client = build_client(&config).unwrap();
		assert_eq!(client.base_url(), "http://127.0.0.1:4000");
		assert_eq!(client.retry_config().max_attempts, 5);
		assert_eq!(client.min_request_interval(), config.search.min_request_interval());

		let registry = build_registry(&client);
		assert!(registry.get("duckduckgo_search").is_some());
	}

	#[tokio::test]
	async fn answer_starting_with_error_is_a_success() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"Abstract": "Error handling in Rust uses Result values."
			})))
			.mount(&server)
			.await;

		let (text, failed) = run_search(&client_for(&server), "rust errors").await;
		assert_eq!(text, "Error handling in Rust uses Result values.");
		assert!(!failed);
	}

	#[tokio::test]
	async fn failed_lookup_is_reported_as_failure() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
			.mount(&server)
			.await;

		let (text, failed) = run_search(&client_for(&server), "rust").await;
		assert!(text.starts_with("Error occurred during search:"), "{text}");
		assert!(failed);
	}
}
