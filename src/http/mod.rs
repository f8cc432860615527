//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing engine (RoutingDecision)
//!     → PassThrough / RewriteTo: forward.rs (renderer)
//!     → RedirectTo / LoginRedirect: response.rs (307)
//!     → stats.rs (counters for the admin API)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod response;
pub mod server;
pub mod stats;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
pub use stats::{DecisionStats, StatsSnapshot};
