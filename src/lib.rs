//! Time-windowed full-text search over weekly log indices, rendered as raw
//! JSON or as a terminal dashboard with a documents-per-interval chart.

pub mod config;
pub mod error;
pub mod indices;
pub mod search;
pub mod timerange;
pub mod ui;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::debug;

use crate::config::{BuildInfo, EsConfig};
use crate::search::client::EsClient;
use crate::search::request::{Aggregation, SearchRequest};
use crate::search::response::SearchResponse;
use crate::timerange::TimeRange;
use crate::ui::dashboard::{self, DashboardOpts};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "eslens",
    version = config::VERSION,
    about = "Time-windowed search over weekly log indices"
)]
pub struct Cli {
    /// Window start, RFC3339 (default: 15 minutes ago)
    #[arg(long)]
    pub start: Option<String>,

    /// Window end, RFC3339 (default: now)
    #[arg(long)]
    pub end: Option<String>,

    /// Signed span overriding one endpoint, e.g. 15m or -1h30m
    #[arg(long)]
    pub span: Option<String>,

    /// Query string
    #[arg(long, default_value = "*")]
    pub query: String,

    /// Document size
    #[arg(long, default_value_t = 3)]
    pub size: u32,

    /// Aggregation interval e.g. 1s, 1m, 1h (empty = no aggregation)
    #[arg(long, default_value = "")]
    pub interval: String,

    /// Show the dashboard (--ui=false prints the raw response)
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub ui: bool,

    /// Dashboard width in columns
    #[arg(long, default_value_t = 96)]
    pub width: u16,
}

pub fn run(build: BuildInfo) -> Result<()> {
    let cli = Cli::parse();
    debug!(
        version = build.version,
        built = build.build_timestamp,
        "starting"
    );

    let config = EsConfig::from_env()?;
    let range = TimeRange::resolve(
        cli.start.as_deref(),
        cli.end.as_deref(),
        cli.span.as_deref(),
        Utc::now(),
    )?;

    let mut request = SearchRequest::new(&cli.query, cli.size, range);
    if !cli.interval.is_empty() {
        request = request.with_aggregation(Aggregation::date_histogram(&cli.interval));
    }

    let pattern = indices::index_names(&config.index_prefix, range.start, range.end);
    debug!(%pattern, "resolved index pattern");

    let client = EsClient::new(&config.host);
    let body = client.search(&pattern, &request)?;

    if cli.ui {
        let response = SearchResponse::from_body(&body)?;
        dashboard::render(&response, &cli.query, range, DashboardOpts { width: cli.width })?;
    } else {
        println!("{body}");
    }
    Ok(())
}
