use crate::error::Result;
use crate::models::Prediction;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Parse pasted prediction rows
///
/// Expected columns, tab separated:
/// `Start  Matchup ("Away @ Home")  Home win %  Implied home spread`
///
/// Malformed rows, probabilities outside (0, 1) and repeated
/// (start, matchup) pairs are skipped, so every returned prediction is safe
/// to hand to the odds engine.
pub fn parse_tsv(raw: &str) -> Result<Vec<Prediction>> {
    let raw = raw.trim();
    let lines: Vec<&str> = raw.lines().collect();
    if lines.len() < 2 {
        return Ok(Vec::new());
    }

    let header = lines[0].to_lowercase();
    let has_header = header.contains("matchup") || header.contains("home win");

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_header)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(raw.as_bytes());

    let mut seen = HashSet::new();
    let mut predictions = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let Some(prediction) = parse_record(&record) else {
            warn!(line = line + 1, "Skipping unparseable prediction row: {:?}", record);
            continue;
        };

        if prediction.home_win_pct <= 0.0 || prediction.home_win_pct >= 1.0 {
            warn!(
                matchup = %prediction.matchup,
                home_win_pct = prediction.home_win_pct,
                "Skipping prediction with win probability outside (0, 1)"
            );
            continue;
        }

        if !seen.insert((prediction.start.clone(), prediction.matchup.clone())) {
            warn!(matchup = %prediction.matchup, "Skipping duplicate prediction");
            continue;
        }

        predictions.push(prediction);
    }

    debug!(count = predictions.len(), "Parsed predictions");
    Ok(predictions)
}

/// Read and parse a prediction file
pub fn load_predictions(path: impl AsRef<Path>) -> Result<Vec<Prediction>> {
    let raw = std::fs::read_to_string(path)?;
    parse_tsv(&raw)
}

fn parse_record(record: &StringRecord) -> Option<Prediction> {
    if record.len() < 4 {
        return None;
    }

    let start = record.get(0)?.to_string();
    let matchup = record.get(1)?.to_string();

    // "Away Team @ Home Team"
    let (away, home) = matchup.rsplit_once(" @ ")?;
    let away_team = away.trim().to_string();
    let home_team = home.trim().to_string();

    let home_win_pct = parse_win_pct(record.get(2)?)?;
    let implied_home_spread = record.get(3)?.parse::<f64>().ok()?;

    Some(Prediction {
        start,
        away_team,
        home_team,
        matchup,
        home_win_pct,
        implied_home_spread,
    })
}

/// "0.62" or "62%"
fn parse_win_pct(cell: &str) -> Option<f64> {
    let value = match cell.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
        None => cell.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Start\tMatchup\tHome win %\tImplied home spread
12:00 PM\tRice @ Houston\t0.956\t18.2
2:30 PM\tTulsa @ Memphis\t0.4\t-3.5
";

    #[test]
    fn test_parse_with_header() {
        let predictions = parse_tsv(SAMPLE).unwrap();
        assert_eq!(predictions.len(), 2);

        let first = &predictions[0];
        assert_eq!(first.start, "12:00 PM");
        assert_eq!(first.away_team, "Rice");
        assert_eq!(first.home_team, "Houston");
        assert_eq!(first.matchup, "Rice @ Houston");
        assert_eq!(first.home_win_pct, 0.956);
        assert_eq!(first.implied_home_spread, 18.2);
        assert_eq!(predictions[1].implied_home_spread, -3.5);
    }

    #[test]
    fn test_parse_without_header() {
        let raw = "12:00 PM\tRice @ Houston\t0.956\t18.2\n2:30 PM\tTulsa @ Memphis\t0.4\t-3.5";
        assert_eq!(parse_tsv(raw).unwrap().len(), 2);
    }

    #[test]
    fn test_single_line_is_empty() {
        assert!(parse_tsv("12:00 PM\tRice @ Houston\t0.956\t18.2").unwrap().is_empty());
        assert!(parse_tsv("").unwrap().is_empty());
        assert!(parse_tsv("   \n  ").unwrap().is_empty());
    }

    #[test]
    fn test_matchup_splits_on_last_at() {
        let raw = "Matchup header\n1:00 PM\tA @ B Tech @ Central\t0.7\t5";
        let predictions = parse_tsv(raw).unwrap();
        assert_eq!(predictions[0].away_team, "A @ B Tech");
        assert_eq!(predictions[0].home_team, "Central");
    }

    #[test]
    fn test_skips_bad_rows() {
        let raw = "Start\tMatchup\tHome win\tSpread
1:00 PM\tNo separator here\t0.7\t5
1:00 PM\tA @ B\tabc\t5
1:00 PM\tA @ B\t0.7
1:00 PM\tC @ D\t1.0\t5
1:00 PM\tE @ F\t0\t5
1:00 PM\tG @ H\t0.65\t2.5";
        let predictions = parse_tsv(raw).unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].matchup, "G @ H");
    }

    #[test]
    fn test_percent_cells() {
        let raw = "Start\tMatchup\tHome win\tSpread\n1:00 PM\tA @ B\t62.5%\t3";
        let predictions = parse_tsv(raw).unwrap();
        assert!((predictions[0].home_win_pct - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_deduplicates_rows() {
        let raw = "Start\tMatchup\tHome win\tSpread
1:00 PM\tA @ B\t0.6\t3
1:00 PM\tA @ B\t0.7\t4
4:00 PM\tA @ B\t0.7\t4";
        let predictions = parse_tsv(raw).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].home_win_pct, 0.6);
    }
}
