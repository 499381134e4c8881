use crate::error::Result;
use crate::models::ParlaySlip;
use crate::utils::odds::format_american_odds;
use serde::Serialize;
use std::path::Path;

/// Flattened slip for CSV export
#[derive(Debug, Serialize)]
struct SlipRow {
    #[serde(rename = "Legs")]
    legs: String,
    #[serde(rename = "Combined Odds")]
    combined_odds: String,
    #[serde(rename = "Decimal Odds")]
    decimal_odds: String,
    #[serde(rename = "Implied Probability (%)")]
    implied_probability: String,
    #[serde(rename = "$100 Payout")]
    payout: String,
}

impl From<&ParlaySlip<'_>> for SlipRow {
    fn from(slip: &ParlaySlip<'_>) -> Self {
        let legs = slip
            .legs
            .iter()
            .map(|leg| {
                format!(
                    "{} ({})",
                    leg.picked_team(),
                    format_american_odds(leg.american_odds)
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");

        Self {
            legs,
            combined_odds: format_american_odds(slip.combined_american_odds),
            decimal_odds: format!("{:.3}", slip.combined_decimal_odds),
            implied_probability: format!("{:.2}", slip.implied_probability * 100.0),
            payout: format!("{:.0}", slip.payout_for_stake(100.0)),
        }
    }
}

/// Save parlay slips to CSV, one row per slip
pub fn save_slips_to_csv(slips: &[ParlaySlip<'_>], path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for slip in slips {
        writer.serialize(SlipRow::from(slip))?;
    }
    writer.flush()?;
    Ok(())
}

/// Save parlay slips to pretty JSON
pub fn save_slips_to_json(slips: &[ParlaySlip<'_>], path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(slips)?;
    std::fs::write(path, json)?;
    Ok(())
}
