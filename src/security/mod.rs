//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Request forwarded to the renderer:
//!     → headers.rs (strip hop-by-hop, set X-Forwarded-*)
//! Response from the renderer:
//!     → headers.rs (strip hop-by-hop)
//! ```
//!
//! # Design Decisions
//! - Never trust existing X-Forwarded-* from clients; they are overwritten
//! - Session checks fail closed (see auth)

pub mod headers;
