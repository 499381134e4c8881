use anyhow::{Context, Result};
use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parlay_slips::config::AppConfig;
use parlay_slips::error::ParlayError;
use parlay_slips::models::{ParlayFilterOptions, ParlayLeg, ParlaySlip, Prediction};
use parlay_slips::parlay::generate_parlays;
use parlay_slips::top_bets::{prediction_table, top_money_line_bets, SortDirection, SortKey};
use parlay_slips::tsv::{load_predictions, parse_tsv};
use parlay_slips::{summarize_slate, SlateSummary};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

// Custom filters for formatting
// Askama passes plain fields by reference and call results by value
mod filters {
    use std::borrow::Borrow;

    pub fn format_odds(odds: impl Borrow<i32>) -> ::askama::Result<String> {
        Ok(parlay_slips::odds::format_american_odds(*odds.borrow()))
    }

    pub fn format_percent(value: impl Borrow<f64>) -> ::askama::Result<String> {
        Ok(format!("{:.1}%", value.borrow() * 100.0))
    }

    pub fn format_spread(value: impl Borrow<f64>) -> ::askama::Result<String> {
        Ok(parlay_slips::models::format_spread(*value.borrow()))
    }

    pub fn format_money(value: impl Borrow<f64>) -> ::askama::Result<String> {
        Ok(format!("{:.0}", value.borrow()))
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    active_page: String,
    summary: SlateSummary<'a>,
    favorites: Vec<ParlaySlip<'a>>,
    predictions: Vec<ParlayLeg<'a>>,
}

#[derive(Template)]
#[template(path = "parlays.html")]
struct ParlaysTemplate<'a> {
    active_page: String,
    form: ParlayQuery,
    max_legs: usize,
    generated: bool,
    error: String,
    parlays: Vec<ParlaySlip<'a>>,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

#[derive(Clone)]
struct AppState {
    predictions: Arc<RwLock<Vec<Prediction>>>,
    config: Arc<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct TableQuery {
    sort: Option<SortKey>,
    direction: Option<SortDirection>,
}

const DEFAULT_LEGS: usize = 3;

/// Form fields arrive as strings; blank means "no bound"
#[derive(Debug, Clone, Default, Deserialize)]
struct ParlayQuery {
    #[serde(default)]
    legs: String,
    #[serde(default)]
    min_total: String,
    #[serde(default)]
    max_total: String,
    #[serde(default)]
    min_leg: String,
    #[serde(default)]
    max_leg: String,
    #[serde(default)]
    limit: String,
}

impl ParlayQuery {
    /// A blank leg count means 3; anything else must be a whole number
    fn options(&self) -> Result<ParlayFilterOptions, ParlayError> {
        let legs = self.legs.trim();
        let num_legs = if legs.is_empty() {
            DEFAULT_LEGS
        } else {
            legs.parse()
                .map_err(|_| ParlayError::Config(format!("legs must be a number, got {:?}", legs)))?
        };

        Ok(ParlayFilterOptions {
            num_legs,
            max_total_odds: parse_bound(&self.max_total),
            min_total_odds: parse_bound(&self.min_total),
            max_per_leg_odds: parse_bound(&self.max_leg),
            min_per_leg_odds: parse_bound(&self.min_leg),
        })
    }

    fn limit(&self, default: usize) -> usize {
        self.limit.trim().parse().unwrap_or(default)
    }
}

fn parse_bound(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

async fn home(State(state): State<AppState>, Query(query): Query<TableQuery>) -> Response {
    let predictions = state.predictions.read().await;

    let mut summary = summarize_slate(&predictions, state.config.top_bets_count);
    let favorites = summary.favorites_slip.take().into_iter().collect();
    let rows = prediction_table(
        &predictions,
        query.sort.unwrap_or_default(),
        query.direction.unwrap_or_default(),
    );

    HtmlTemplate(HomeTemplate {
        active_page: "home".to_string(),
        summary,
        favorites,
        predictions: rows,
    })
    .into_response()
}

async fn parlays_page(State(state): State<AppState>, Query(query): Query<ParlayQuery>) -> Response {
    let predictions = state.predictions.read().await;
    let max_legs = parlay_slips::MAX_PARLAY_LEGS.min(predictions.len());
    let generated = !query.legs.is_empty();

    let mut error = String::new();
    let mut parlays = Vec::new();
    if generated {
        let options = query
            .options()
            .and_then(|options| options.validate(predictions.len()).map(|()| options));
        match options {
            Ok(options) => {
                parlays = generate_parlays(
                    &predictions,
                    &options,
                    query.limit(state.config.parlay_limit),
                )
            }
            Err(e) => error = e.to_string(),
        }
    }

    HtmlTemplate(ParlaysTemplate {
        active_page: "parlays".to_string(),
        form: query,
        max_legs,
        generated,
        error,
        parlays,
    })
    .into_response()
}

async fn api_load_predictions(State(state): State<AppState>, body: String) -> Response {
    match parse_tsv(&body) {
        Ok(parsed) => {
            let count = parsed.len();
            *state.predictions.write().await = parsed;
            tracing::info!(count, "Loaded predictions");
            Json(serde_json::json!({ "count": count })).into_response()
        }
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

async fn api_parlays(State(state): State<AppState>, Query(query): Query<ParlayQuery>) -> Response {
    let predictions = state.predictions.read().await;
    let options = match query
        .options()
        .and_then(|options| options.validate(predictions.len()).map(|()| options))
    {
        Ok(options) => options,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let parlays: Vec<ParlaySlip<'_>> =
        generate_parlays(&predictions, &options, query.limit(state.config.parlay_limit));
    Json(parlays).into_response()
}

async fn api_top_bets(State(state): State<AppState>) -> Response {
    let predictions = state.predictions.read().await;
    let bets: Vec<ParlayLeg<'_>> = top_money_line_bets(&predictions, state.config.top_bets_count);
    Json(bets).into_response()
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/parlays", get(parlays_page))
        .route("/api/predictions", post(api_load_predictions))
        .route("/api/parlays", get(api_parlays))
        .route("/api/top-bets", get(api_top_bets))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    let predictions = match &config.predictions_file {
        Some(path) => load_predictions(path)
            .with_context(|| format!("Failed to load predictions from {}", path.display()))?,
        None => {
            tracing::info!("No PREDICTIONS_FILE set, starting with an empty slate");
            Vec::new()
        }
    };
    tracing::info!(count = predictions.len(), "Predictions loaded");

    let addr = config.web_addr.clone();
    let state = AppState {
        predictions: Arc::new(RwLock::new(predictions)),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
