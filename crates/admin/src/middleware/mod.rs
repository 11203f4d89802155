//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS for the dashboard origin
//! 4. Request ID (add unique ID to each request)
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//! 6. Security headers
//! 7. Auth extractor on every route except login

pub mod auth;
pub mod rate_limit;
pub mod session;

pub use alqotari_storefront::middleware::{request_id_middleware, security_headers_middleware};
pub use auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
pub use rate_limit::login_rate_limiter;
pub use session::create_session_layer;
