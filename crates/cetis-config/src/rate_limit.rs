//! Per-IP rate limiting.
//!
//! Token buckets keyed by client IP. The login endpoint gets its own, much
//! smaller bucket so password guessing is throttled independently of normal
//! API traffic.
//!
//! - `RATE_LIMIT_GENERAL_PER_SECOND`: seconds per replenished token, general routes (default: 2)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE`: bucket size, general routes (default: 30)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: seconds per replenished token, login (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size, login (default: 5)
//!
//! Client IPs are read from `X-Forwarded-For`/`X-Real-IP`/`Forwarded` first
//! and the socket peer address second, so the server must be started with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

pub type IpGovernorConfig = GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub general_per_second: u64,
    pub general_burst_size: u32,
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_second: 2,
            general_burst_size: 30,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            general_per_second: std::env::var("RATE_LIMIT_GENERAL_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.general_per_second),
            general_burst_size: std::env::var("RATE_LIMIT_GENERAL_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.general_burst_size),
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auth_per_second),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auth_burst_size),
        }
    }

    /// Governor config for every `/api` route.
    ///
    /// # Panics
    ///
    /// Never in practice: zero values are raised to 1 before building.
    #[must_use]
    pub fn general_governor_config(&self) -> IpGovernorConfig {
        build_config(self.general_per_second, self.general_burst_size)
    }

    /// Governor config for `POST /api/auth/login`.
    #[must_use]
    pub fn auth_governor_config(&self) -> IpGovernorConfig {
        build_config(self.auth_per_second, self.auth_burst_size)
    }
}

fn build_config(per_second: u64, burst_size: u32) -> IpGovernorConfig {
    GovernorConfigBuilder::default()
        .per_second(per_second.max(1))
        .burst_size(burst_size.max(1))
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .expect("non-zero rate limit quota")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.general_per_second, 2);
        assert_eq!(config.general_burst_size, 30);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_zero_values_still_build() {
        let config = RateLimitConfig {
            general_per_second: 0,
            general_burst_size: 0,
            auth_per_second: 0,
            auth_burst_size: 0,
        };
        let _general = config.general_governor_config();
        let _auth = config.auth_governor_config();
    }
}
