//! Engagement API abstraction.
//!
//! This module provides an `EngagementApi` trait for the third-party
//! marketing-analytics service plus the Snov.io implementation, with a
//! shared minimum-interval rate limiter and tolerant campaign parsing.

mod client;
mod parse;
mod rate_limiter;
mod types;

pub use client::SnovClient;
pub use parse::{campaigns_from_analytics, campaigns_from_basic, UNKNOWN_ID, UNKNOWN_NAME};
pub use rate_limiter::RateLimiter;
pub use types::*;
