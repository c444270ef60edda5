//! Comparison and orchestration core

pub mod comparison;
pub mod runner;
pub mod score;

pub use comparison::compare_offers;
pub use runner::ResearchRunner;
pub use score::{baseline_score, bonus_score, BonusValue};
