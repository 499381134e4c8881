/// Convert a win probability to American odds
/// Favorites (prob >= 0.5) get negative odds: the stake needed to win $100
/// Underdogs get positive odds: the amount won on a $100 stake
/// Returns 0 when the probability is outside (0, 1), meaning "no odds"
pub fn prob_to_american_odds(prob: f64) -> i32 {
    if prob <= 0.0 || prob >= 1.0 {
        return 0;
    }

    if prob >= 0.5 {
        // Favorite (negative odds)
        (-prob / (1.0 - prob) * 100.0).round() as i32
    } else {
        // Underdog (positive odds)
        ((1.0 - prob) / prob * 100.0).round() as i32
    }
}

/// Convert a win probability to decimal odds, 0 when outside (0, 1)
pub fn prob_to_decimal_odds(prob: f64) -> f64 {
    if prob <= 0.0 || prob >= 1.0 {
        return 0.0;
    }
    1.0 / prob
}

/// Convert decimal odds to American odds
/// Decimal odds of 1.0 or less have no American equivalent and map to 0
pub fn decimal_to_american_odds(decimal: f64) -> i32 {
    if decimal.is_nan() || decimal <= 1.0 {
        return 0;
    }

    if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round() as i32
    } else {
        (-100.0 / (decimal - 1.0)).round() as i32
    }
}

/// Format American odds with an explicit "+" for underdogs
pub fn format_american_odds(odds: i32) -> String {
    if odds > 0 {
        format!("+{}", odds)
    } else {
        format!("{}", odds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prob_to_american_odds() {
        // Even odds boundary counts as a favorite
        assert_eq!(prob_to_american_odds(0.5), -100);
        assert_eq!(prob_to_american_odds(0.956), -2173);
        assert_eq!(prob_to_american_odds(0.6), -150);
        assert_eq!(prob_to_american_odds(0.4), 150);
        assert_eq!(prob_to_american_odds(0.25), 300);
    }

    #[test]
    fn test_prob_to_american_odds_sign() {
        for i in 1..100 {
            let prob = i as f64 / 100.0;
            let odds = prob_to_american_odds(prob);
            if prob >= 0.5 {
                assert!(odds < 0, "prob {} gave {}", prob, odds);
            } else {
                assert!(odds > 0, "prob {} gave {}", prob, odds);
            }
        }
    }

    #[test]
    fn test_out_of_range_probability_is_sentinel() {
        assert_eq!(prob_to_american_odds(0.0), 0);
        assert_eq!(prob_to_american_odds(1.0), 0);
        assert_eq!(prob_to_american_odds(-0.2), 0);
        assert_eq!(prob_to_american_odds(1.5), 0);
        assert_eq!(prob_to_decimal_odds(0.0), 0.0);
        assert_eq!(prob_to_decimal_odds(1.0), 0.0);
    }

    #[test]
    fn test_prob_to_decimal_odds() {
        for prob in [0.01, 0.25, 0.5, 0.6, 0.956, 0.99] {
            assert!((prob_to_decimal_odds(prob) - 1.0 / prob).abs() < 1e-12);
        }
    }

    #[test]
    fn test_decimal_to_american_odds() {
        assert_eq!(decimal_to_american_odds(2.0), 100);
        assert_eq!(decimal_to_american_odds(3.5), 250);
        assert_eq!(decimal_to_american_odds(1.5), -200);
        assert_eq!(decimal_to_american_odds(1.25), -400);
        assert_eq!(decimal_to_american_odds(1.0), 0);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 3.125 is exact in binary, so this lands on 212.5
        assert_eq!(decimal_to_american_odds(3.125), 213);
        assert_eq!(decimal_to_american_odds(3.375), 238);
    }

    #[test]
    fn test_format_american_odds() {
        assert_eq!(format_american_odds(150), "+150");
        assert_eq!(format_american_odds(-2182), "-2182");
        assert_eq!(format_american_odds(0), "0");
    }
}
