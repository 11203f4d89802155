//! Rate limiting for admin login attempts.

use std::sync::Arc;

use alqotari_storefront::middleware::rate_limit::{CloudflareIpKeyExtractor, RateLimiterLayer};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};

/// Create rate limiter for login: ~5 attempts per minute per IP.
///
/// Configuration: 1 request every 12 seconds (replenish), burst of 5.
///
/// # Panics
///
/// This function will not panic. `per_second(12)` and `burst_size(5)` are
/// valid positive integers, always accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn login_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(CloudflareIpKeyExtractor)
        .per_second(12)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(12) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}
