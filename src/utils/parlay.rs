use crate::models::{ParlayFilterOptions, ParlayLeg, ParlaySlip, Prediction};
use crate::utils::slip::{build_parlay_slip, prediction_to_best_leg};
use tracing::debug;

/// Hard ceiling on enumerated leg combinations per generation request
pub const MAX_COMBINATIONS: usize = 10_000;

/// Legs in the favorites-only slip
pub const FAVORITES_SLIP_LEGS: usize = 5;

/// Lazy lexicographic walk over the k-subsets of `0..n`
///
/// Yields index sets in lexicographic order, so `[0, 1, 2]` comes before
/// `[0, 1, 3]`. Taking only a prefix of the walk keeps the subsets built from
/// the earliest inputs, which is how the combination cap truncates.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.indices.clone();
        let k = self.indices.len();

        // Rightmost index that can still move forward
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(current)
    }
}

fn leg_within_bounds(leg: &ParlayLeg<'_>, options: &ParlayFilterOptions) -> bool {
    let magnitude = leg.american_odds.unsigned_abs();

    if let Some(max) = options.max_per_leg_odds {
        if magnitude > max.unsigned_abs() {
            return false;
        }
    }
    if let Some(min) = options.min_per_leg_odds {
        if magnitude < min.unsigned_abs() {
            return false;
        }
    }
    true
}

/// Total bounds compare signed odds, unlike the per-leg magnitudes
/// A total maximum never rejects a favorite-priced slip; a total minimum
/// always does
fn slip_within_bounds(slip: &ParlaySlip<'_>, options: &ParlayFilterOptions) -> bool {
    let odds = slip.combined_american_odds;

    if let Some(max) = options.max_total_odds {
        if odds > 0 && odds > max {
            return false;
        }
    }
    if let Some(min) = options.min_total_odds {
        if odds <= 0 || odds < min {
            return false;
        }
    }
    true
}

/// Generate up to `limit` parlays from the best side of each prediction
///
/// Results are sorted by combined decimal odds ascending, so the likeliest
/// (shortest-paying) slip comes first. At most [`MAX_COMBINATIONS`] leg
/// combinations are considered; past the cap, combinations that start later
/// in `predictions` are never built. Degenerate inputs give an empty list.
pub fn generate_parlays<'a>(
    predictions: &'a [Prediction],
    options: &ParlayFilterOptions,
    limit: usize,
) -> Vec<ParlaySlip<'a>> {
    if options.num_legs == 0 {
        return Vec::new();
    }

    let legs: Vec<ParlayLeg<'a>> = predictions
        .iter()
        .map(prediction_to_best_leg)
        .filter(|leg| leg_within_bounds(leg, options))
        .collect();

    if legs.len() < options.num_legs {
        debug!(
            eligible_legs = legs.len(),
            num_legs = options.num_legs,
            "Not enough eligible legs for a parlay"
        );
        return Vec::new();
    }

    let mut combinations = Combinations::new(legs.len(), options.num_legs);
    let mut considered = 0;
    let mut parlays: Vec<ParlaySlip<'a>> = Vec::new();

    for indices in combinations.by_ref().take(MAX_COMBINATIONS) {
        considered += 1;
        let slip = build_parlay_slip(indices.iter().map(|&i| legs[i].clone()).collect());
        if slip_within_bounds(&slip, options) {
            parlays.push(slip);
        }
    }

    if considered == MAX_COMBINATIONS && combinations.next().is_some() {
        debug!(cap = MAX_COMBINATIONS, "Combination cap reached, remaining combinations skipped");
    }

    parlays.sort_by(|a, b| a.combined_decimal_odds.total_cmp(&b.combined_decimal_odds));
    parlays.truncate(limit);

    debug!(
        eligible_legs = legs.len(),
        considered,
        returned = parlays.len(),
        "Generated parlays"
    );

    parlays
}

/// One slip from the least confident favorites of the day
///
/// Takes the favored side of every game, sorts by win probability ascending
/// and keeps the first five. No odds filters apply. Empty input gives `None`.
pub fn favorites_only_slip(predictions: &[Prediction]) -> Option<ParlaySlip<'_>> {
    if predictions.is_empty() {
        return None;
    }

    let mut legs: Vec<ParlayLeg<'_>> = predictions.iter().map(prediction_to_best_leg).collect();
    legs.sort_by(|a, b| a.win_pct.total_cmp(&b.win_pct));
    legs.truncate(FAVORITES_SLIP_LEGS);

    Some(build_parlay_slip(legs))
}
