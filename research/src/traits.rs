//! Collaborator trait definitions for dependency injection

use std::collections::HashMap;

use async_trait::async_trait;
use shared::{BaselineOffer, DiscoveredPromotion, RunMode, RunResult, StoredRun};

use crate::error::ResearchResult;
use crate::types::StateCasinos;

/// Source of the known-offers baseline, one entry per casino name.
#[mockall::automock]
#[async_trait]
pub trait OffersSource: Send + Sync {
    /// Fetch the current baseline mapping (casino name -> offer).
    async fn fetch_existing_offers(&self) -> ResearchResult<HashMap<String, BaselineOffer>>;
}

/// AI-backed enumeration of licensed online casinos per jurisdiction.
#[mockall::automock]
#[async_trait]
pub trait CasinoDiscovery: Send + Sync {
    /// Discover casino names operating in the given jurisdiction.
    async fn discover(&self, jurisdiction: &str) -> ResearchResult<StateCasinos>;
}

/// AI-backed research of the current welcome bonus for one casino.
#[mockall::automock]
#[async_trait]
pub trait PromotionResearch: Send + Sync {
    /// Research the best current casino welcome bonus. A malformed
    /// provider answer still yields a best-effort record with zeroed
    /// numeric fields; only transport-level failures error.
    async fn research(&self, casino: &str, jurisdiction: &str)
        -> ResearchResult<DiscoveredPromotion>;
}

/// Durable storage for completed run results.
#[mockall::automock]
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Persist one run result.
    async fn save_run(&self, mode: RunMode, result: &RunResult) -> ResearchResult<()>;

    /// Retrieve the most recently persisted run, if any.
    async fn last_run(&self) -> ResearchResult<Option<StoredRun>>;
}
