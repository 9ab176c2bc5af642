// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! DuckDuckGo Instant Answer client for Phosphorus.
//!
//! This crate provides a rate-limited, retrying client for the DuckDuckGo
//! Instant Answer API. Results are typed ([`SearchAnswer`] or
//! [`DuckDuckGoError`]); the `*_text` methods translate them into the plain
//! strings agent frameworks expect from a tool.

pub mod client;
pub mod error;
pub mod gather;
pub mod types;

pub use client::DuckDuckGoClient;
pub use error::{DuckDuckGoError, GatherError};
pub use gather::GatheredAnswer;
pub use phosphorus_common_http::RetryConfig;
pub use types::{is_error_text, SearchAnswer, GATHER_FAILED, NO_RESULTS};
