use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use parlay_slips::config::AppConfig;
use parlay_slips::data::{save_slips_to_csv, save_slips_to_json};
use parlay_slips::models::{format_spread, ParlayFilterOptions, ParlaySlip};
use parlay_slips::odds::format_american_odds;
use parlay_slips::parlay::{favorites_only_slip, generate_parlays};
use parlay_slips::top_bets::{prediction_table, top_money_line_bets, SortDirection, SortKey};
use parlay_slips::tsv::load_predictions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parlay-slips", about = "Money lines and parlays from game predictions")]
struct Cli {
    /// Tab-separated predictions file (falls back to PREDICTIONS_FILE)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every prediction with its predicted winner and money line
    Table {
        #[arg(long, value_enum, default_value_t = SortKey::WinPct)]
        sort: SortKey,
        #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
        direction: SortDirection,
    },
    /// Show the strongest money line picks
    Top {
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// Generate parlays under odds constraints
    Parlays {
        #[arg(short, long, default_value_t = 3)]
        legs: usize,
        #[arg(long, allow_hyphen_values = true)]
        min_total: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        max_total: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        min_leg: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        max_leg: Option<i32>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Build one slip from the least confident favorites
    Favorites,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let Some(path) = cli.file.or(config.predictions_file.clone()) else {
        bail!("No predictions file given (use --file or set PREDICTIONS_FILE)");
    };
    let predictions = load_predictions(&path)
        .with_context(|| format!("Failed to load predictions from {}", path.display()))?;

    println!("Loaded {} predictions from {}\n", predictions.len(), path.display());

    match cli.command {
        Command::Table { sort, direction } => {
            for (i, row) in prediction_table(&predictions, sort, direction).iter().enumerate() {
                println!(
                    "{}. {} | {} | Winner: {} {:.1}% ({}) | Home spread: {}",
                    i + 1,
                    row.prediction.start,
                    row.prediction.matchup,
                    row.picked_team(),
                    row.win_pct * 100.0,
                    format_american_odds(row.american_odds),
                    format_spread(row.prediction.implied_home_spread)
                );
            }
        }
        Command::Top { count } => {
            let bets = top_money_line_bets(&predictions, count.unwrap_or(config.top_bets_count));
            if bets.is_empty() {
                println!("No money line bets found.");
            } else {
                println!("Top {} Money Line Bets:\n", bets.len());
                for (i, bet) in bets.iter().enumerate() {
                    println!("{}. {}", i + 1, bet.format());
                }
            }
        }
        Command::Parlays {
            legs,
            min_total,
            max_total,
            min_leg,
            max_leg,
            limit,
            csv,
            json,
        } => {
            let options = ParlayFilterOptions {
                num_legs: legs,
                max_total_odds: max_total,
                min_total_odds: min_total,
                max_per_leg_odds: max_leg,
                min_per_leg_odds: min_leg,
            };
            options.validate(predictions.len())?;

            let parlays =
                generate_parlays(&predictions, &options, limit.unwrap_or(config.parlay_limit));
            print_slips(&parlays);

            if let Some(path) = csv {
                save_slips_to_csv(&parlays, &path)?;
                println!("\nSaved parlays to {}", path.display());
            }
            if let Some(path) = json {
                save_slips_to_json(&parlays, &path)?;
                println!("\nSaved parlays to {}", path.display());
            }
        }
        Command::Favorites => match favorites_only_slip(&predictions) {
            Some(slip) => {
                println!("Favorites Parlay ({} legs):\n", slip.legs.len());
                for (i, leg) in slip.legs.iter().enumerate() {
                    println!("{}. {}", i + 1, leg.format());
                }
                println!("\n{}", slip.format());
            }
            None => println!("No predictions to build a favorites parlay from."),
        },
    }

    Ok(())
}

fn print_slips(parlays: &[ParlaySlip<'_>]) {
    if parlays.is_empty() {
        println!("No parlays found. Try loosening the odds limits or reducing the number of legs.");
        return;
    }

    println!("Top {} Parlays:\n", parlays.len());
    for (i, slip) in parlays.iter().enumerate() {
        println!("{}. {}", i + 1, slip.format());
    }
}
