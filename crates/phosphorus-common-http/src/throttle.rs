// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Minimum-interval throttling for a single client instance.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;
use tracing::debug;

/// Enforces a minimum spacing between completed requests.
///
/// The throttle is owned by one client; it is not a global rate limiter.
/// Callers hold the returned [`ThrottleGuard`] for the whole request so that
/// concurrent tasks sharing a client are serialized and never observe a
/// stale timestamp.
#[derive(Debug)]
pub struct Throttle {
	min_interval: Duration,
	last_request: Mutex<Option<Instant>>,
}

/// Exclusive access to the throttle's timestamp for the duration of one
/// request.
#[derive(Debug)]
pub struct ThrottleGuard<'a> {
	last_request: MutexGuard<'a, Option<Instant>>,
}

impl Throttle {
	pub fn new(min_interval: Duration) -> Self {
		Self {
			min_interval,
			last_request: Mutex::new(None),
		}
	}

	pub fn min_interval(&self) -> Duration {
		self.min_interval
	}

	/// Waits until the minimum interval since the last completed request has
	/// elapsed, then returns the guard.
	pub async fn acquire(&self) -> ThrottleGuard<'_> {
		let last_request = self.last_request.lock().await;

		if let Some(last) = *last_request {
			let elapsed = last.elapsed();
			if elapsed < self.min_interval {
				let wait = self.min_interval - elapsed;
				debug!(wait_ms = wait.as_millis(), "throttling request");
				tokio::time::sleep(wait).await;
			}
		}

		ThrottleGuard { last_request }
	}
}

impl ThrottleGuard<'_> {
	/// Records that a request completed now.
	pub fn mark(mut self) {
		*self.last_request = Some(Instant::now());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;

	#[test]
	fn first_acquire_does_not_wait() {
		let throttle = Throttle::new(Duration::from_secs(60));
		let start = std::time::Instant::now();
		tokio_test::block_on(async {
			throttle.acquire().await.mark();
		});
		assert!(start.elapsed() < Duration::from_secs(1));
	}

	#[tokio::test]
	async fn consecutive_requests_are_spaced() {
		let throttle = Throttle::new(Duration::from_millis(100));

		throttle.acquire().await.mark();
		let start = std::time::Instant::now();
		throttle.acquire().await.mark();

		assert!(start.elapsed() >= Duration::from_millis(90));
	}

	#[tokio::test]
	async fn unmarked_request_does_not_reset_interval() {
		let throttle = Throttle::new(Duration::from_millis(200));

		drop(throttle.acquire().await);
		let start = std::time::Instant::now();
		throttle.acquire().await.mark();

		assert!(start.elapsed() < Duration::from_millis(150));
	}

	#[tokio::test]
	async fn concurrent_callers_are_serialized() {
		let throttle = Arc::new(Throttle::new(Duration::from_millis(50)));
		let start = std::time::Instant::now();

		let mut handles = Vec::new();
		for _ in 0..3 {
			let throttle = Arc::clone(&throttle);
			handles.push(tokio::spawn(async move {
				throttle.acquire().await.mark();
			}));
		}
		for handle in handles {
			handle.await.unwrap();
		}

		// First goes straight through, the other two each wait one interval.
		assert!(start.elapsed() >= Duration::from_millis(95));
	}
}
