// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tools exposed to agent frameworks.

mod duckduckgo;
mod error;
mod registry;

pub use duckduckgo::{DuckDuckGoSearchTool, INVALID_INPUT};
pub use error::ToolError;
pub use registry::{Tool, ToolDefinition, ToolRegistry};
