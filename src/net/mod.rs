//! Network layer subsystem.
//!
//! Plain TCP listeners are bound directly by the HTTP server; this module
//! only carries the optional TLS setup.

pub mod tls;
