use crate::models::{ParlayLeg, ParlaySlip, Pick, Prediction};
use crate::utils::odds::{decimal_to_american_odds, prob_to_american_odds, prob_to_decimal_odds};

/// Take the side with the higher win probability, ties go to the home team
pub fn prediction_to_best_leg(prediction: &Prediction) -> ParlayLeg<'_> {
    let home_prob = prediction.home_win_pct;
    let away_prob = prediction.away_win_pct();
    let is_home_favorite = home_prob >= away_prob;

    let (pick, win_pct) = if is_home_favorite {
        (Pick::Home, home_prob)
    } else {
        (Pick::Away, away_prob)
    };

    ParlayLeg {
        prediction,
        pick,
        win_pct,
        american_odds: prob_to_american_odds(win_pct),
        decimal_odds: prob_to_decimal_odds(win_pct),
    }
}

/// Combine legs into one slip, assuming the legs are independent
///
/// Combined decimal odds are the product of the leg decimal odds. The
/// generator never passes an empty list; if it happens the slip carries
/// decimal odds of 1.0 and the 0 American odds sentinel.
pub fn build_parlay_slip(legs: Vec<ParlayLeg<'_>>) -> ParlaySlip<'_> {
    let combined_decimal_odds: f64 = legs.iter().map(|leg| leg.decimal_odds).product();
    let implied_probability = 1.0 / combined_decimal_odds;
    let combined_american_odds = decimal_to_american_odds(combined_decimal_odds);

    ParlaySlip {
        legs,
        combined_decimal_odds,
        combined_american_odds,
        implied_probability,
    }
}
