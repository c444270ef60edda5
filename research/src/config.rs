//! Environment-backed configuration for the research service

use crate::error::{ResearchError, ResearchResult};

pub const DEFAULT_PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_PERPLEXITY_MODEL: &str = "sonar";
pub const DEFAULT_OFFERS_API_URL: &str =
    "https://xhks-nxia-vlqr.n7c.xano.io/api:1ZwRS-f0/activeSUB";

/// Jurisdictions researched when `RESEARCH_STATES` is not set.
pub const DEFAULT_JURISDICTIONS: [&str; 4] =
    ["New Jersey", "Michigan", "Pennsylvania", "West Virginia"];

/// Configuration for the research pipeline and its collaborator clients.
///
/// All base URLs are injectable so tests can point the clients at a
/// local mock server.
#[derive(Clone, Debug)]
pub struct ResearchConfig {
    pub perplexity_api_key: String,
    pub perplexity_api_url: String,
    pub perplexity_model: String,
    pub offers_api_url: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub jurisdictions: Vec<String>,
}

impl ResearchConfig {
    /// Load configuration from the process environment. Missing required
    /// values fail here, at startup, rather than on first use.
    pub fn from_env() -> ResearchResult<Self> {
        Ok(Self {
            perplexity_api_key: require("PERPLEXITY_API_KEY")?,
            perplexity_api_url: optional("PERPLEXITY_API_URL", DEFAULT_PERPLEXITY_API_URL),
            perplexity_model: optional("PERPLEXITY_MODEL", DEFAULT_PERPLEXITY_MODEL),
            offers_api_url: optional("OFFERS_API_URL", DEFAULT_OFFERS_API_URL),
            supabase_url: require("SUPABASE_URL")?,
            supabase_service_key: require("SUPABASE_SERVICE_KEY")?,
            jurisdictions: jurisdictions_from(std::env::var("RESEARCH_STATES").ok()),
        })
    }
}

fn require(name: &str) -> ResearchResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ResearchError::ConfigError {
            message: format!("{name} is not set"),
        }),
    }
}

fn optional(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn jurisdictions_from(raw: Option<String>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if parsed.is_empty() {
        DEFAULT_JURISDICTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}
