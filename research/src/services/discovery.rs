//! AI-backed casino discovery per jurisdiction

use async_trait::async_trait;
use tracing::debug;

use crate::error::ResearchResult;
use crate::services::perplexity::PerplexityClient;
use crate::traits::CasinoDiscovery;
use crate::types::StateCasinos;

const DISCOVERY_TEMPERATURE: f32 = 0.2;

/// Casino discovery backed by the Perplexity search API.
#[derive(Clone)]
pub struct RealCasinoDiscovery {
    perplexity: PerplexityClient,
}

impl RealCasinoDiscovery {
    pub fn new(perplexity: PerplexityClient) -> Self {
        Self { perplexity }
    }

    fn build_prompt(jurisdiction: &str) -> String {
        format!(
            r#"Find ALL licensed online casino operators currently operating in {jurisdiction}, USA.

Priority sources:
- {jurisdiction} Division of Gaming Enforcement
- {jurisdiction} Gaming Control Board
- Official state gaming commission websites

Focus ONLY on online casino platforms (iGaming), NOT sportsbooks.

Even if you find limited information, list all known operators.

Return as JSON:
{{
"state": "{jurisdiction}",
"casinos": ["BetMGM", "DraftKings Casino", "FanDuel Casino", ...]
}}

Return ONLY the JSON object, no markdown or additional text."#
        )
    }
}

#[async_trait]
impl CasinoDiscovery for RealCasinoDiscovery {
    async fn discover(&self, jurisdiction: &str) -> ResearchResult<StateCasinos> {
        let prompt = Self::build_prompt(jurisdiction);
        let content = self.perplexity.ask(&prompt, DISCOVERY_TEMPERATURE).await?;

        // An answer that is not the requested JSON object counts as
        // "no casinos found", not as a failure.
        match serde_json::from_str::<StateCasinos>(content.trim()) {
            Ok(reply) => Ok(reply),
            Err(e) => {
                debug!("unparseable discovery answer for {jurisdiction}: {e}");
                Ok(StateCasinos {
                    state: jurisdiction.to_string(),
                    casinos: Vec::new(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_targets_igaming_in_the_jurisdiction() {
        let prompt = RealCasinoDiscovery::build_prompt("Michigan");
        assert!(prompt.contains("Michigan, USA"));
        assert!(prompt.contains("NOT sportsbooks"));
        assert!(prompt.contains("\"state\": \"Michigan\""));
    }
}
