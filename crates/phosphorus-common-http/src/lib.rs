// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Phosphorus.
//!
//! This crate provides:
//! - A pre-configured HTTP client with consistent User-Agent header
//! - Retry logic with exponential backoff for transient failures
//! - A per-instance throttle enforcing a minimum spacing between requests

mod client;
mod retry;
mod throttle;

pub use client::{builder, user_agent};
pub use retry::{backoff_delay, retry, RetryConfig, RetryableError};
pub use throttle::{Throttle, ThrottleGuard};
