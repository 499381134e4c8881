pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod utils;

pub use config::*;
pub use error::*;
pub use models::*;
pub use parsers::*;
pub use utils::*;

use serde::Serialize;
use utils::parlay::favorites_only_slip;
use utils::top_bets::top_money_line_bets;

/// Everything the overview pages show for one slate of predictions
#[derive(Debug, Clone, Serialize)]
pub struct SlateSummary<'a> {
    pub game_count: usize,
    pub top_bets: Vec<ParlayLeg<'a>>,
    pub favorites_slip: Option<ParlaySlip<'a>>,
}

/// Build the overview for a slate
pub fn summarize_slate(predictions: &[Prediction], top_n: usize) -> SlateSummary<'_> {
    SlateSummary {
        game_count: predictions.len(),
        top_bets: top_money_line_bets(predictions, top_n),
        favorites_slip: favorites_only_slip(predictions),
    }
}
