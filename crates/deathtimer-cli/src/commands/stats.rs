use chrono::Utc;
use clap::Args;
use deathtimer_core::{Config, Database, DotGrid, LifeProgress, LifeStatistics};
use serde::Serialize;

use super::{print_json, require_profile, CliResult};

#[derive(Args)]
pub struct StatsArgs {
    /// Also print the month grid, one row per line
    #[arg(long)]
    grid: bool,
    /// Override the configured grid width
    #[arg(long)]
    columns: Option<usize>,
}

#[derive(Serialize)]
struct StatsReport {
    progress: LifeProgress,
    /// Percentage lived clamped to 0..=100; absent when the lifespan is empty.
    clamped_percentage_lived: Option<f64>,
    statistics: LifeStatistics,
    grid: DotGrid,
    caption: String,
}

pub fn run(args: StatsArgs) -> CliResult {
    let db = Database::open()?;
    let profile = require_profile(&db)?;
    let death = profile
        .predicted_death_date()
        .ok_or("profile has no predicted death date")?;
    let columns = match args.columns {
        Some(0) => return Err("columns must be greater than zero".into()),
        Some(columns) => columns,
        None => Config::load_or_default().stats.grid_columns,
    };

    let progress = LifeProgress::compute(profile.birth_date(), death, Utc::now());
    let grid = progress.dot_grid(columns);
    print_json(&StatsReport {
        progress,
        clamped_percentage_lived: progress.clamped_percentage_lived(),
        statistics: progress.statistics(),
        grid,
        caption: progress.month_caption(),
    })?;

    if args.grid {
        for row in grid.render('●', '○') {
            println!("{row}");
        }
    }
    Ok(())
}
