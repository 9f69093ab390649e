//! HTTP middleware and extractors for the directory server.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Security headers (CSP, framing, caching)

pub mod client_ip;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod verification;

pub use client_ip::ClientIp;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use verification::{EnabledPortal, RequireVerified};
