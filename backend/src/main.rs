//! Calendar preview
//!
//! Builds the feeding calendar for a set of evaluations and foods stored as
//! JSON and prints the displayed month's layout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{BarFrame, DogFood, Evaluation, MonthLayout, YearMonth};

use dogfood_backend::{initialize_backend, CalendarConfig};

#[derive(Parser)]
#[command(name = "calendar-preview")]
#[command(about = "Print the feeding calendar layout for a month")]
#[command(version)]
struct Cli {
    /// JSON array of evaluations
    #[arg(long)]
    records: PathBuf,

    /// JSON array of dog foods
    #[arg(long)]
    foods: PathBuf,

    /// Month to display (YYYY-MM), defaults to the current month
    #[arg(long)]
    month: Option<String>,

    /// Date treated as today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,

    /// YAML calendar config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page width in points; with --page-height, bar rectangles are printed too
    #[arg(long)]
    page_width: Option<f64>,

    #[arg(long)]
    page_height: Option<f64>,
}

#[derive(Serialize)]
struct Preview {
    lane_count: usize,
    layout: MonthLayout,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    frames: Vec<BarFrame>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CalendarConfig::load(path)?,
        None => CalendarConfig::default(),
    };
    let backend = initialize_backend(config)?;

    let today = match &cli.today {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .with_context(|| format!("Invalid --today date: {}", value))?,
        None => Local::now().date_naive(),
    };
    let month = match &cli.month {
        Some(value) => backend.calendar_service.parse_year_month(value)?,
        None => YearMonth::from_date(today),
    };

    let evaluations: Vec<Evaluation> = read_json(&cli.records)?;
    let foods: Vec<DogFood> = read_json(&cli.foods)?;
    info!("Loaded {} evaluations and {} foods", evaluations.len(), foods.len());

    let pages = backend.calendar_pages(evaluations, &foods, month, today);
    let frames = match (cli.page_width, cli.page_height) {
        (Some(width), Some(height)) => {
            backend.layout_service.bar_frames(&pages.current, width, height)
        }
        _ => Vec::new(),
    };

    let preview = Preview {
        lane_count: pages.lane_count,
        layout: pages.current,
        frames,
    };
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}
