//! AI-backed welcome-bonus research per casino

use async_trait::async_trait;
use shared::DiscoveredPromotion;
use tracing::debug;

use crate::error::ResearchResult;
use crate::services::perplexity::PerplexityClient;
use crate::traits::PromotionResearch;

const RESEARCH_TEMPERATURE: f32 = 0.3;

/// Promotion research backed by the Perplexity search API.
#[derive(Clone)]
pub struct RealPromotionResearch {
    perplexity: PerplexityClient,
}

impl RealPromotionResearch {
    pub fn new(perplexity: PerplexityClient) -> Self {
        Self { perplexity }
    }

    fn build_prompt(casino: &str, jurisdiction: &str) -> String {
        format!(
            r#"Find the BEST current CASINO welcome bonus for {casino} in {jurisdiction} (NOT sportsbook).
Focus on: deposit match %, free spins/play value, total bonus amount.
Return ONLY this JSON:
{{
  "casino": "{casino}",
  "state": "{jurisdiction}",
  "promotion": "brief title",
  "bonus_amount": 1000,
  "match_percent": 100,
  "description": "one line summary"
}}
Use 0 for bonus_amount or match_percent if not applicable.
IMPORTANT: Return ONLY the JSON object, no additional text or markdown formatting."#
        )
    }
}

#[async_trait]
impl PromotionResearch for RealPromotionResearch {
    async fn research(
        &self,
        casino: &str,
        jurisdiction: &str,
    ) -> ResearchResult<DiscoveredPromotion> {
        let prompt = Self::build_prompt(casino, jurisdiction);
        let content = self.perplexity.ask(&prompt, RESEARCH_TEMPERATURE).await?;

        // A malformed answer still yields a best-effort record carrying
        // the raw content as the promotion label, with zeroed numerics.
        match serde_json::from_str::<DiscoveredPromotion>(content.trim()) {
            Ok(promo) => Ok(promo),
            Err(e) => {
                debug!("unparseable promotion answer for {casino} ({jurisdiction}): {e}");
                Ok(DiscoveredPromotion {
                    casino: Some(casino.to_string()),
                    state: jurisdiction.to_string(),
                    promotion: content,
                    bonus_amount: 0.0,
                    match_percent: 0.0,
                    description: String::new(),
                })
            }
        }
    }
}
