//! Research library for the casino promotion system
//!
//! Provides the collaborator traits (offers baseline, AI-backed casino
//! discovery and promotion research, run persistence), their real HTTP
//! implementations, and the comparison/orchestration core.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

pub use crate::config::ResearchConfig;
pub use crate::core::runner::ResearchRunner;
pub use crate::error::{ApiFailure, ResearchError, ResearchResult};
pub use crate::traits::*;
pub use crate::types::*;
