//! Baseline offers client for the external offers service

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use shared::BaselineOffer;
use tracing::{debug, warn};

use crate::error::{ResearchError, ResearchResult};
use crate::traits::OffersSource;

const OFFERS_TIMEOUT: Duration = Duration::from_secs(10);

/// Baseline offers sourced from the Xano REST endpoint.
#[derive(Clone)]
pub struct RealOffersSource {
    client: reqwest::Client,
    url: String,
}

impl RealOffersSource {
    pub fn new(url: String) -> ResearchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(OFFERS_TIMEOUT)
            .build()?;
        Ok(Self { client, url })
    }

    /// Normalize the raw feed into the baseline mapping. Items that are
    /// not objects or carry no casino name are skipped, never fatal.
    fn normalize(payload: serde_json::Value) -> HashMap<String, BaselineOffer> {
        let Some(items) = payload.as_array() else {
            warn!("unexpected payload format while fetching offers");
            return HashMap::new();
        };

        let mut offers = HashMap::new();
        for item in items {
            if !item.is_object() {
                continue;
            }
            let offer: BaselineOffer = match serde_json::from_value(item.clone()) {
                Ok(offer) => offer,
                Err(e) => {
                    debug!("skipping unparseable baseline item: {e}");
                    continue;
                }
            };
            if offer.name.is_empty() {
                continue;
            }
            offers.insert(offer.name.clone(), offer);
        }
        offers
    }
}

#[async_trait]
impl OffersSource for RealOffersSource {
    async fn fetch_existing_offers(&self) -> ResearchResult<HashMap<String, BaselineOffer>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ResearchError::OffersSourceError {
                message: e.to_string(),
            })?;

        let payload: serde_json::Value = response.json().await?;
        Ok(Self::normalize(payload))
    }
}
