//! Offer comparison and classification

use std::collections::HashMap;

use shared::{BaselineOffer, DiscoveredPromotion, OfferComparison, OfferStatus};

use crate::core::score::{baseline_score, BonusValue};

/// Compare every discovered promotion against the baseline mapping.
///
/// Promotions without a casino name are silently dropped; every
/// surviving promotion yields exactly one comparison record, in input
/// order.
pub fn compare_offers(
    existing: &HashMap<String, BaselineOffer>,
    promos: &[DiscoveredPromotion],
) -> Vec<OfferComparison> {
    promos
        .iter()
        .filter_map(|promo| {
            let casino = promo.casino.as_deref()?;
            Some(compare_one(existing, casino, promo))
        })
        .collect()
}

/// Classify one promotion against the baseline. Pure; never errors.
pub fn compare_one(
    existing: &HashMap<String, BaselineOffer>,
    casino: &str,
    promo: &DiscoveredPromotion,
) -> OfferComparison {
    let baseline = existing.get(casino);
    let current_bonus = baseline_score(baseline);
    let new_bonus = promo.bonus_score();

    let status = match baseline {
        None => OfferStatus::NewCasino,
        Some(_) if new_bonus > current_bonus => OfferStatus::Better,
        Some(_) if new_bonus < current_bonus => OfferStatus::Worse,
        Some(_) if current_bonus > 0.0 => OfferStatus::Same,
        // Both scores degenerate to zero with a baseline present.
        Some(_) => OfferStatus::Alternative,
    };

    OfferComparison {
        casino: casino.to_string(),
        state: promo.state.clone(),
        current_offer: baseline
            .map(|b| b.display_offer().to_string())
            .unwrap_or_default(),
        new_offer: promo.promotion.clone(),
        current_bonus,
        new_bonus,
        status,
        new_details: promo.clone(),
    }
}
