//! HTTP surface for the casino promotion research system
//!
//! Wires the research runner and run store behind a small axum API:
//! manual and scheduled run triggers, last-result retrieval, and a
//! health check.

pub mod error;
pub mod server_impl;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use server_impl::ResearchServer;
pub use state::ServerState;
