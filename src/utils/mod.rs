pub mod data;
pub mod odds;
pub mod parlay;
pub mod slip;
pub mod top_bets;
