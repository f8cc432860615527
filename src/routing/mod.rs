//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path, credentials)
//!     → request.rs (RequestDescriptor adapters)
//!     → host.rs (tenant extraction)
//!     → tenant.rs (TenantKind)
//!     → path.rs (auth exemption)
//!     → auth::TokenValidator (only when not exempt)
//!     → rewrite.rs (internal path)
//!     → Return: RoutingDecision
//!
//! Engine Construction (at startup):
//!     TenancyConfig
//!     → Compile suffix rules (ordered)
//!     → Normalize base hosts
//!     → Freeze as immutable RoutingEngine
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in hot path (suffix and substring matching only)
//! - Deterministic: same host always yields the same tenant
//! - First suffix match wins

pub mod decision;
pub mod engine;
pub mod host;
pub mod path;
pub mod request;
pub mod rewrite;
pub mod tenant;

pub use decision::RoutingDecision;
pub use engine::RoutingEngine;
pub use host::HostParser;
pub use path::PathClassifier;
pub use request::RequestDescriptor;
pub use rewrite::RouteRewriter;
pub use tenant::{TenantIdentifier, TenantKind};
