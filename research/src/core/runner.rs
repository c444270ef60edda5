//! Run orchestration
//!
//! Sequences the per-jurisdiction and per-casino external calls,
//! isolates every collaborator failure to the single item it affects,
//! and assembles the combined run record. Nothing here retries and
//! nothing is fatal: the worst case is an empty result.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use shared::{DiscoveredPromotion, FailureStage, RunFailure, RunMode, RunResult};
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::comparison::compare_offers;
use crate::traits::{CasinoDiscovery, OffersSource, PromotionResearch, RunStore};

/// Research job orchestrator with injected collaborators.
pub struct ResearchRunner<O, D, P, S>
where
    O: OffersSource,
    D: CasinoDiscovery,
    P: PromotionResearch,
    S: RunStore,
{
    offers: Arc<O>,
    discovery: Arc<D>,
    research: Arc<P>,
    store: Arc<S>,
    jurisdictions: Vec<String>,
}

impl<O, D, P, S> ResearchRunner<O, D, P, S>
where
    O: OffersSource,
    D: CasinoDiscovery,
    P: PromotionResearch,
    S: RunStore,
{
    pub fn new(
        offers: Arc<O>,
        discovery: Arc<D>,
        research: Arc<P>,
        store: Arc<S>,
        jurisdictions: Vec<String>,
    ) -> Self {
        Self {
            offers,
            discovery,
            research,
            store,
            jurisdictions,
        }
    }

    pub fn jurisdictions(&self) -> &[String] {
        &self.jurisdictions
    }

    /// Execute one full research run. Strictly sequential; every
    /// external call is independently fault-isolated and failures are
    /// collected into the run report.
    pub async fn run(&self, mode: RunMode) -> RunResult {
        let timestamp = Utc::now();
        let run_id = Uuid::new_v4();
        info!("starting {mode} run {run_id} at {timestamp}");

        let mut failures = Vec::new();

        let existing = match self.offers.fetch_existing_offers().await {
            Ok(offers) => offers,
            Err(e) => {
                warn!("error fetching baseline offers: {e}");
                failures.push(RunFailure {
                    stage: FailureStage::Baseline,
                    jurisdiction: None,
                    casino: None,
                    message: e.to_string(),
                });
                HashMap::new()
            }
        };

        let mut discovered: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut promos: Vec<DiscoveredPromotion> = Vec::new();

        for jurisdiction in &self.jurisdictions {
            info!("discovering casinos in {jurisdiction}");
            let casinos = match self.discovery.discover(jurisdiction).await {
                Ok(reply) => reply.casinos,
                Err(e) => {
                    warn!("error discovering casinos in {jurisdiction}: {e}");
                    failures.push(RunFailure {
                        stage: FailureStage::Discovery,
                        jurisdiction: Some(jurisdiction.clone()),
                        casino: None,
                        message: e.to_string(),
                    });
                    Vec::new()
                }
            };

            for casino in &casinos {
                match self.research.research(casino, jurisdiction).await {
                    Ok(promo) => promos.push(promo),
                    Err(e) => {
                        warn!("promotion research failed for {casino}: {e}");
                        failures.push(RunFailure {
                            stage: FailureStage::Research,
                            jurisdiction: Some(jurisdiction.clone()),
                            casino: Some(casino.clone()),
                            message: e.to_string(),
                        });
                    }
                }
            }

            discovered.insert(jurisdiction.clone(), casinos);
        }

        let offer_comparisons = compare_offers(&existing, &promos);
        let result = RunResult {
            run_id,
            timestamp,
            missing_casinos: discovered,
            offer_comparisons,
            failures,
        };

        // Fire-and-forget: a persistence failure never changes the
        // returned result.
        match self.store.save_run(mode, &result).await {
            Ok(()) => info!("{mode} run completed and saved"),
            Err(e) => warn!("failed to save run: {e}"),
        }

        result
    }
}
