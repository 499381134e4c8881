use crate::models::{ParlayLeg, Prediction};
use crate::utils::slip::prediction_to_best_leg;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default number of money line picks to show
pub const DEFAULT_TOP_BETS: usize = 5;

/// The strongest money line picks, most confident first
pub fn top_money_line_bets(predictions: &[Prediction], top_n: usize) -> Vec<ParlayLeg<'_>> {
    let mut bets: Vec<ParlayLeg<'_>> = predictions.iter().map(prediction_to_best_leg).collect();

    // Sort by win probability (descending) and take top N
    bets.sort_by(|a, b| b.win_pct.partial_cmp(&a.win_pct).unwrap_or(Ordering::Equal));

    bets.into_iter().take(top_n).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Start,
    Matchup,
    #[default]
    WinPct,
    Spread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort predictions for the table view
pub fn sort_predictions(
    predictions: &[Prediction],
    key: SortKey,
    direction: SortDirection,
) -> Vec<&Prediction> {
    let mut sorted: Vec<&Prediction> = predictions.iter().collect();

    sorted.sort_by(|a, b| {
        let cmp = match key {
            SortKey::Start => a.start.cmp(&b.start),
            SortKey::Matchup => a.matchup.cmp(&b.matchup),
            SortKey::WinPct => a.best_win_pct().total_cmp(&b.best_win_pct()),
            SortKey::Spread => a.implied_home_spread.total_cmp(&b.implied_home_spread),
        };
        match direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });

    sorted
}

/// Table rows: the predicted winner of each game in sort order
/// Rows show the same best-side win % the `WinPct` key sorts on
pub fn prediction_table(
    predictions: &[Prediction],
    key: SortKey,
    direction: SortDirection,
) -> Vec<ParlayLeg<'_>> {
    sort_predictions(predictions, key, direction)
        .into_iter()
        .map(prediction_to_best_leg)
        .collect()
}
