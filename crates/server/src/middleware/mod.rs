//! HTTP middleware

pub mod audit;
pub mod metrics;
pub mod rate_limit;
pub mod request_id;
pub mod role_gate;

pub use audit::audit_middleware;
pub use metrics::metrics_middleware;
pub use rate_limit::{SharedRateLimiter, create_rate_limiter, rate_limit_middleware};
pub use request_id::request_id_middleware;
pub use role_gate::{require_admin, require_doctor};
