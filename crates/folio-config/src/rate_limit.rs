//! Per-IP rate limiting configuration.
//!
//! Uses the token bucket from `governor` through `tower_governor`: one token is
//! replenished every `period_ms`, and at most `burst_size` tokens accumulate.
//! The general defaults allow 100 requests per 15 minutes per client; auth
//! endpoints get a smaller bucket.
//!
//! # Environment Variables
//!
//! - `RATE_LIMIT_ENABLED`: `false` or `0` disables limiting (default: enabled)
//! - `RATE_LIMIT_GENERAL_PERIOD_MS`: replenish interval, general routes (default: 9000)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE`: bucket size, general routes (default: 100)
//! - `RATE_LIMIT_AUTH_PERIOD_MS`: replenish interval, auth routes (default: 30000)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size, auth routes (default: 20)

use std::time::Duration;

use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::{env_flag, env_or};

pub type IpGovernorConfig = GovernorConfig<SmartIpKeyExtractor, NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub general_period_ms: u64,
    pub general_burst_size: u32,
    pub auth_period_ms: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general_period_ms: 9_000,
            general_burst_size: 100,
            auth_period_ms: 30_000,
            auth_burst_size: 20,
        }
    }
}

impl RateLimitConfig {
    /// Values of zero are raised to one so the governor config always builds.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_flag("RATE_LIMIT_ENABLED", defaults.enabled),
            general_period_ms: env_or("RATE_LIMIT_GENERAL_PERIOD_MS", defaults.general_period_ms)
                .max(1),
            general_burst_size: env_or(
                "RATE_LIMIT_GENERAL_BURST_SIZE",
                defaults.general_burst_size,
            )
            .max(1),
            auth_period_ms: env_or("RATE_LIMIT_AUTH_PERIOD_MS", defaults.auth_period_ms).max(1),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size).max(1),
        }
    }

    /// A config with limiting turned off, for tests and local tooling.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Governor config for general API routes, or `None` when disabled.
    #[must_use]
    pub fn general_governor_config(&self) -> Option<IpGovernorConfig> {
        self.build(self.general_period_ms, self.general_burst_size)
    }

    /// Governor config for `/api/auth` routes, or `None` when disabled.
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<IpGovernorConfig> {
        self.build(self.auth_period_ms, self.auth_burst_size)
    }

    fn build(&self, period_ms: u64, burst_size: u32) -> Option<IpGovernorConfig> {
        if !self.enabled {
            return None;
        }

        GovernorConfigBuilder::default()
            .period(Duration::from_millis(period_ms.max(1)))
            .burst_size(burst_size.max(1))
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}
