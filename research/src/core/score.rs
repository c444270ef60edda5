//! Bonus value normalization
//!
//! Collapses an offer into a single comparable score. The match
//! percentage is weighted 10x the flat bonus amount; the weighting is a
//! pinned design parameter, not a tunable.

use shared::{BaselineOffer, DiscoveredPromotion};

const MATCH_WEIGHT: f64 = 10.0;

/// Single comparable score for a pair of bonus figures.
pub fn bonus_score(bonus_amount: f64, match_percent: f64) -> f64 {
    bonus_amount + match_percent * MATCH_WEIGHT
}

/// Anything that can be collapsed into a bonus score.
pub trait BonusValue {
    fn bonus_score(&self) -> f64;
}

impl BonusValue for BaselineOffer {
    /// The baseline feed carries only an expected bonus figure; the
    /// match percentage is structurally absent and counts as 0.
    fn bonus_score(&self) -> f64 {
        bonus_score(self.expected_bonus, 0.0)
    }
}

impl BonusValue for DiscoveredPromotion {
    fn bonus_score(&self) -> f64 {
        bonus_score(self.bonus_amount, self.match_percent)
    }
}

/// Score for an optional baseline entry; absence scores 0.
pub fn baseline_score(offer: Option<&BaselineOffer>) -> f64 {
    offer.map(BonusValue::bonus_score).unwrap_or(0.0)
}
