//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → public listener stops accepting → in-flight requests drain
//!             → admin listener stops → Exit
//! ```
//!
//! # Design Decisions
//! - One broadcast channel fans the signal out to every listener
//! - Shutdown has a drain deadline: TLS listeners are forced closed after it

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
