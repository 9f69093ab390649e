//! HTTP route handlers for the directory.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check (in main.rs)
//! GET  /health/ready            - Readiness check (in main.rs)
//!
//! # Internal directory (DIRECTORY_MODE=internal)
//! GET  /                        - Main or contact directory
//! POST /filters                 - Apply filter form
//! POST /filters/reset           - Reset filters
//! POST /view                    - Switch directory view
//!
//! # External portals (DIRECTORY_MODE=portal; {portal} = court | police)
//! GET  /{portal}                - Verification form, or directory once verified
//! POST /{portal}/verify         - Verification attempt
//! POST /{portal}/logout         - Clear the session
//! POST /{portal}/filters        - Apply filter form (verified only)
//! POST /{portal}/filters/reset  - Reset filters (verified only)
//! POST /{portal}/view           - Switch directory view (verified only)
//! ```

pub mod directory;
pub mod portal;

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::ServeMode;
use crate::state::AppState;

/// Create the internal directory routes router.
pub fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(directory::index))
        .route("/filters", post(directory::update_filters))
        .route("/filters/reset", post(directory::reset_filters))
        .route("/view", post(directory::select_view))
}

/// Create the portal routes router.
pub fn portal_routes() -> Router<AppState> {
    Router::new()
        .route("/{portal}", get(portal::home))
        .route("/{portal}/verify", post(portal::verify))
        .route("/{portal}/logout", post(portal::logout))
        .route("/{portal}/filters", post(portal::update_filters))
        .route("/{portal}/filters/reset", post(portal::reset_filters))
        .route("/{portal}/view", post(portal::select_view))
}

/// Create the routes a deployment in `mode` serves.
///
/// The ungated internal directory is never mounted next to the portals.
pub fn routes(mode: ServeMode) -> Router<AppState> {
    match mode {
        ServeMode::Internal => directory_routes(),
        ServeMode::Portal => portal_routes(),
    }
}
