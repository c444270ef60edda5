//! Shared types for the casino promotion research system
//!
//! Contains the domain records exchanged between the research core, the
//! collaborator clients and the webserver, plus the common logging
//! setup. Component-internal types stay in their respective crates.

pub mod logging;
pub mod types;

pub use types::*;
