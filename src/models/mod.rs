use serde::{Deserialize, Serialize};

/// A model prediction for a single game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub start: String,
    pub away_team: String,
    pub home_team: String,
    pub matchup: String,
    pub home_win_pct: f64, // Probability between 0 and 1 (exclusive)
    pub implied_home_spread: f64,
}

impl Prediction {
    /// Away probability is always derived, never stored
    pub fn away_win_pct(&self) -> f64 {
        1.0 - self.home_win_pct
    }

    /// Win probability of whichever side is favored
    pub fn best_win_pct(&self) -> f64 {
        if self.home_win_pct >= 0.5 {
            self.home_win_pct
        } else {
            self.away_win_pct()
        }
    }
}

/// Which side of a game a leg takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pick {
    Home,
    Away,
}

/// A single-game wager on the favored side of a prediction
#[derive(Debug, Clone, Serialize)]
pub struct ParlayLeg<'a> {
    pub prediction: &'a Prediction,
    pub pick: Pick,
    pub win_pct: f64,
    pub american_odds: i32, // American odds format (e.g., -110, +150)
    pub decimal_odds: f64,
}

impl ParlayLeg<'_> {
    pub fn picked_team(&self) -> &str {
        match self.pick {
            Pick::Home => &self.prediction.home_team,
            Pick::Away => &self.prediction.away_team,
        }
    }

    pub fn opponent(&self) -> &str {
        match self.pick {
            Pick::Home => &self.prediction.away_team,
            Pick::Away => &self.prediction.home_team,
        }
    }

    /// Implied spread from the picked side's perspective
    /// A home favorite at +7.5 implied home spread lays -7.5
    pub fn pick_spread(&self) -> f64 {
        let spread = self.prediction.implied_home_spread;
        match self.pick {
            Pick::Home if spread > 0.0 => -spread,
            Pick::Home => spread.abs(),
            Pick::Away if spread > 0.0 => spread,
            Pick::Away => -spread.abs(),
        }
    }

    /// Format the leg as a readable string
    pub fn format(&self) -> String {
        format!(
            "{} ({}) vs {} | Win: {:.1}% | Spread: {} | {}",
            self.picked_team(),
            crate::utils::odds::format_american_odds(self.american_odds),
            self.opponent(),
            self.win_pct * 100.0,
            format_spread(self.pick_spread()),
            self.prediction.start
        )
    }
}

/// Render a spread with an explicit sign, "+3.5" / "-7"
pub fn format_spread(spread: f64) -> String {
    if spread > 0.0 {
        format!("+{}", spread)
    } else {
        format!("{}", spread)
    }
}

/// A joint wager over independent legs
#[derive(Debug, Clone, Serialize)]
pub struct ParlaySlip<'a> {
    pub legs: Vec<ParlayLeg<'a>>,
    pub combined_decimal_odds: f64,
    pub combined_american_odds: i32,
    pub implied_probability: f64,
}

impl ParlaySlip<'_> {
    /// Total return (stake included) if every leg hits
    pub fn payout_for_stake(&self, stake: f64) -> f64 {
        stake * self.combined_decimal_odds
    }

    pub fn format(&self) -> String {
        let legs = self
            .legs
            .iter()
            .map(|leg| {
                format!(
                    "{} ({})",
                    leg.picked_team(),
                    crate::utils::odds::format_american_odds(leg.american_odds)
                )
            })
            .collect::<Vec<_>>()
            .join(" + ");

        format!(
            "{} | Odds: {} | Implied: {:.2}% | $100 pays ${:.0}",
            legs,
            crate::utils::odds::format_american_odds(self.combined_american_odds),
            self.implied_probability * 100.0,
            self.payout_for_stake(100.0)
        )
    }
}

/// Constraints for parlay generation
/// Per-leg bounds are American-odds magnitudes with the sign ignored;
/// total bounds compare signed combined odds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParlayFilterOptions {
    pub num_legs: usize,
    #[serde(default)]
    pub max_total_odds: Option<i32>,
    #[serde(default)]
    pub min_total_odds: Option<i32>,
    #[serde(default)]
    pub max_per_leg_odds: Option<i32>,
    #[serde(default)]
    pub min_per_leg_odds: Option<i32>,
}

impl ParlayFilterOptions {
    pub fn new(num_legs: usize) -> Self {
        Self {
            num_legs,
            ..Default::default()
        }
    }

    /// Caller-side bound on the leg count: 2 ..= min(10, predictions)
    pub fn validate(&self, prediction_count: usize) -> Result<(), crate::error::ParlayError> {
        let max_legs = MAX_PARLAY_LEGS.min(prediction_count);
        if self.num_legs < 2 || self.num_legs > max_legs {
            return Err(crate::error::ParlayError::InvalidLegCount {
                requested: self.num_legs,
                max: max_legs,
            });
        }
        Ok(())
    }
}

/// Largest parlay a caller may request
pub const MAX_PARLAY_LEGS: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(home_win_pct: f64, implied_home_spread: f64) -> Prediction {
        Prediction {
            start: "12:00 PM".to_string(),
            away_team: "Navy".to_string(),
            home_team: "Army".to_string(),
            matchup: "Navy @ Army".to_string(),
            home_win_pct,
            implied_home_spread,
        }
    }

    fn leg(prediction: &Prediction, pick: Pick) -> ParlayLeg<'_> {
        ParlayLeg {
            prediction,
            pick,
            win_pct: 0.6,
            american_odds: -150,
            decimal_odds: 1.0 / 0.6,
        }
    }

    #[test]
    fn test_pick_spread() {
        let p = prediction(0.8, 7.5);
        assert_eq!(leg(&p, Pick::Home).pick_spread(), -7.5);
        assert_eq!(leg(&p, Pick::Away).pick_spread(), 7.5);

        let p = prediction(0.3, -4.0);
        assert_eq!(leg(&p, Pick::Home).pick_spread(), 4.0);
        assert_eq!(leg(&p, Pick::Away).pick_spread(), -4.0);
    }

    #[test]
    fn test_picked_team_and_opponent() {
        let p = prediction(0.3, -4.0);
        let away = leg(&p, Pick::Away);
        assert_eq!(away.picked_team(), "Navy");
        assert_eq!(away.opponent(), "Army");
    }

    #[test]
    fn test_format_spread() {
        assert_eq!(format_spread(3.5), "+3.5");
        assert_eq!(format_spread(-7.0), "-7");
        assert_eq!(format_spread(0.0), "0");
    }

    #[test]
    fn test_validate_leg_count() {
        assert!(ParlayFilterOptions::new(2).validate(4).is_ok());
        assert!(ParlayFilterOptions::new(1).validate(4).is_err());
        assert!(ParlayFilterOptions::new(5).validate(4).is_err());
        assert!(ParlayFilterOptions::new(11).validate(20).is_err());
        assert!(ParlayFilterOptions::new(10).validate(20).is_ok());
    }
}
