//! Core domain types for casino promotion research
//!
//! Upstream payloads (Xano baseline feed, Perplexity research answers,
//! Supabase rows) are parsed into these records at the collaborator
//! boundary; the research core never touches raw JSON maps. Numeric
//! fields that arrive malformed coerce to zero instead of failing the
//! whole record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Lenient numeric parsing: numbers pass through, numeric strings are
/// converted, anything else (null, objects, junk text) becomes 0.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(coerce_f64(value.as_ref()))
}

/// Coerce an optional JSON value into a comparable number.
pub fn coerce_f64(value: Option<&serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Jurisdiction reference attached to a baseline offer.
///
/// The baseline feed sends either an object with `Name`/`Abbreviation`
/// or a bare state string; both shapes normalize here.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StateRef {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

impl<'de> Deserialize<'de> for StateRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Object {
                #[serde(default, alias = "Name")]
                name: Option<String>,
                #[serde(default, alias = "Abbreviation")]
                abbreviation: Option<String>,
            },
            Plain(String),
            Other(serde_json::Value),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Object { name, abbreviation } => StateRef { name, abbreviation },
            Raw::Plain(name) => StateRef {
                name: Some(name),
                abbreviation: None,
            },
            Raw::Other(_) => StateRef::default(),
        })
    }
}

/// Known promotional offer for a casino, sourced fresh each run from the
/// offers service. Keyed by exact casino name; never persisted by us.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineOffer {
    #[serde(default, alias = "Name", alias = "casino")]
    pub name: String,
    #[serde(default)]
    pub casinodb_id: Option<i64>,
    #[serde(default, alias = "Offer_Name")]
    pub offer_name: String,
    /// Legacy offer label; only used when `offer_name` is empty.
    #[serde(default)]
    pub promotion: String,
    #[serde(default)]
    pub offer_type: Option<String>,
    #[serde(default, alias = "Expected_Deposit", deserialize_with = "lenient_f64")]
    pub expected_deposit: f64,
    #[serde(
        default,
        alias = "Expected_Bonus",
        alias = "Bonus_Amount",
        alias = "bonus_amount",
        deserialize_with = "lenient_f64"
    )]
    pub expected_bonus: f64,
    #[serde(default)]
    pub states_id: Option<i64>,
    #[serde(default)]
    pub state: Option<StateRef>,
}

impl BaselineOffer {
    /// Label shown as the "current offer" in comparison records.
    pub fn display_offer(&self) -> &str {
        if self.offer_name.is_empty() {
            &self.promotion
        } else {
            &self.offer_name
        }
    }
}

/// Promotion found during the current run via AI-assisted research.
///
/// Every field defaults: the research answer is best-effort and may be
/// missing anything, including the casino name itself (such records are
/// filtered before comparison, never an error).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredPromotion {
    #[serde(default)]
    pub casino: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub promotion: String,
    #[serde(default, alias = "Bonus_Amount", deserialize_with = "lenient_f64")]
    pub bonus_amount: f64,
    #[serde(default, alias = "Match_Percent", deserialize_with = "lenient_f64")]
    pub match_percent: f64,
    #[serde(default)]
    pub description: String,
}

/// Classification of a discovered promotion against the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    #[serde(rename = "New Casino")]
    NewCasino,
    Better,
    Worse,
    Same,
    Alternative,
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferStatus::NewCasino => write!(f, "New Casino"),
            OfferStatus::Better => write!(f, "Better"),
            OfferStatus::Worse => write!(f, "Worse"),
            OfferStatus::Same => write!(f, "Same"),
            OfferStatus::Alternative => write!(f, "Alternative"),
        }
    }
}

/// One comparison result per successfully researched promotion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OfferComparison {
    pub casino: String,
    pub state: String,
    pub current_offer: String,
    pub new_offer: String,
    pub current_bonus: f64,
    pub new_bonus: f64,
    pub status: OfferStatus,
    /// Full researched record, kept for audit and debugging.
    pub new_details: DiscoveredPromotion,
}

/// Stage of the run at which an external call failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Baseline,
    Discovery,
    Research,
}

/// Per-item collaborator failure, surfaced in the run report rather than
/// only logged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunFailure {
    pub stage: FailureStage,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub casino: Option<String>,
    pub message: String,
}

/// How a research run was triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Manual,
    Scheduled,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Manual => "manual",
            RunMode::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate output of one orchestrator invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Jurisdiction -> discovered casino names; jurisdictions whose
    /// discovery failed map to an empty list.
    pub missing_casinos: BTreeMap<String, Vec<String>>,
    pub offer_comparisons: Vec<OfferComparison>,
    #[serde(default)]
    pub failures: Vec<RunFailure>,
}

/// Row shape of a persisted run, as returned by the external store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredRun {
    #[serde(default)]
    pub id: Option<i64>,
    pub mode: String,
    pub result_json: RunResult,
    /// Assigned by the store on insert.
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lenient_numbers_accept_strings_and_reject_junk() {
        let promo: DiscoveredPromotion = serde_json::from_value(json!({
            "casino": "BetMGM",
            "bonus_amount": "1000",
            "match_percent": "not a number"
        }))
        .unwrap();

        assert_eq!(promo.bonus_amount, 1000.0);
        assert_eq!(promo.match_percent, 0.0);
    }

    #[test]
    fn promotion_defaults_when_fields_absent() {
        let promo: DiscoveredPromotion = serde_json::from_value(json!({})).unwrap();

        assert_eq!(promo.casino, None);
        assert_eq!(promo.bonus_amount, 0.0);
        assert_eq!(promo.match_percent, 0.0);
        assert!(promo.promotion.is_empty());
    }

    #[test]
    fn legacy_field_spellings_are_accepted() {
        let promo: DiscoveredPromotion = serde_json::from_value(json!({
            "casino": "DraftKings Casino",
            "Bonus_Amount": 500,
            "Match_Percent": 50
        }))
        .unwrap();

        assert_eq!(promo.bonus_amount, 500.0);
        assert_eq!(promo.match_percent, 50.0);
    }

    #[test]
    fn baseline_offer_parses_feed_shape() {
        let offer: BaselineOffer = serde_json::from_value(json!({
            "Name": "Acme Casino",
            "casinodb_id": 42,
            "Offer_Name": "100% to $500",
            "offer_type": "deposit_match",
            "Expected_Deposit": "250",
            "Expected_Bonus": 500,
            "state": { "Name": "New Jersey", "Abbreviation": "NJ" }
        }))
        .unwrap();

        assert_eq!(offer.name, "Acme Casino");
        assert_eq!(offer.expected_deposit, 250.0);
        assert_eq!(offer.expected_bonus, 500.0);
        assert_eq!(offer.display_offer(), "100% to $500");
        let state = offer.state.unwrap();
        assert_eq!(state.name.as_deref(), Some("New Jersey"));
        assert_eq!(state.abbreviation.as_deref(), Some("NJ"));
    }

    #[test]
    fn state_ref_accepts_bare_string() {
        let offer: BaselineOffer = serde_json::from_value(json!({
            "Name": "Acme Casino",
            "state": "Michigan"
        }))
        .unwrap();

        let state = offer.state.unwrap();
        assert_eq!(state.name.as_deref(), Some("Michigan"));
        assert_eq!(state.abbreviation, None);
    }

    #[test]
    fn display_offer_falls_back_to_legacy_promotion() {
        let offer: BaselineOffer = serde_json::from_value(json!({
            "Name": "Acme Casino",
            "promotion": "old style deal"
        }))
        .unwrap();

        assert_eq!(offer.display_offer(), "old style deal");
    }

    #[test]
    fn offer_status_serializes_to_display_strings() {
        assert_eq!(
            serde_json::to_value(OfferStatus::NewCasino).unwrap(),
            json!("New Casino")
        );
        assert_eq!(serde_json::to_value(OfferStatus::Better).unwrap(), json!("Better"));
        assert_eq!(
            serde_json::to_value(OfferStatus::Alternative).unwrap(),
            json!("Alternative")
        );
    }

    #[test]
    fn run_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(RunMode::Manual).unwrap(), json!("manual"));
        assert_eq!(RunMode::Scheduled.to_string(), "scheduled");
    }

    #[test]
    fn run_result_round_trips_through_json() {
        let result = RunResult {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            missing_casinos: BTreeMap::from([(
                "New Jersey".to_string(),
                vec!["BetMGM".to_string()],
            )]),
            offer_comparisons: vec![OfferComparison {
                casino: "BetMGM".to_string(),
                state: "New Jersey".to_string(),
                current_offer: String::new(),
                new_offer: "100% match".to_string(),
                current_bonus: 0.0,
                new_bonus: 2000.0,
                status: OfferStatus::NewCasino,
                new_details: DiscoveredPromotion {
                    casino: Some("BetMGM".to_string()),
                    state: "New Jersey".to_string(),
                    promotion: "100% match".to_string(),
                    bonus_amount: 1000.0,
                    match_percent: 100.0,
                    description: String::new(),
                },
            }],
            failures: vec![RunFailure {
                stage: FailureStage::Discovery,
                jurisdiction: Some("Michigan".to_string()),
                casino: None,
                message: "upstream unreachable".to_string(),
            }],
        };

        let encoded = serde_json::to_value(&result).unwrap();
        let decoded: RunResult = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, result);
    }
}
