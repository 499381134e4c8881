use crate::error::{ParlayError, Result};
use crate::utils::top_bets::DEFAULT_TOP_BETS;
use std::path::PathBuf;
use std::str::FromStr;

/// Default number of parlays returned per request
pub const DEFAULT_PARLAY_LIMIT: usize = 5;

pub const DEFAULT_WEB_ADDR: &str = "0.0.0.0:3000";

/// Runtime settings shared by the front-ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// TSV file to load predictions from
    pub predictions_file: Option<PathBuf>,
    pub parlay_limit: usize,
    pub top_bets_count: usize,
    pub web_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predictions_file: None,
            parlay_limit: DEFAULT_PARLAY_LIMIT,
            top_bets_count: DEFAULT_TOP_BETS,
            web_addr: DEFAULT_WEB_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    /// Read settings from the environment, loading `.env` first
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            predictions_file: lookup("PREDICTIONS_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            parlay_limit: parse_var(&lookup, "PARLAY_LIMIT")?.unwrap_or(defaults.parlay_limit),
            top_bets_count: parse_var(&lookup, "TOP_BETS_COUNT")?
                .unwrap_or(defaults.top_bets_count),
            web_addr: lookup("WEB_ADDR").unwrap_or(defaults.web_addr),
        })
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ParlayError::Config(format!("{} must be a number, got {:?}", key, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.parlay_limit, 5);
        assert_eq!(config.top_bets_count, 5);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PREDICTIONS_FILE", "data/today.tsv"),
            ("PARLAY_LIMIT", "10"),
            ("WEB_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();
        assert_eq!(config.predictions_file, Some(PathBuf::from("data/today.tsv")));
        assert_eq!(config.parlay_limit, 10);
        assert_eq!(config.web_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_bad_number() {
        let err = config_from(&[("PARLAY_LIMIT", "lots")]).unwrap_err();
        assert!(matches!(err, ParlayError::Config(_)));
    }
}
