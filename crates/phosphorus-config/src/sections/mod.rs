// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

pub mod logging;
pub mod search;

pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use search::{SearchConfig, SearchConfigLayer};
