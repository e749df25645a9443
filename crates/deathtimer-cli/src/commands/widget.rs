use chrono::Utc;
use clap::Args;
use deathtimer_core::{Config, Database, WidgetContent, WidgetFamily};

use super::{print_json, CliResult};

#[derive(Args)]
pub struct WidgetArgs {
    /// Widget size: small, medium or large
    #[arg(default_value_t = WidgetFamily::Small)]
    family: WidgetFamily,
}

/// Widgets only read the shared store and never create it.
pub fn run(args: WidgetArgs) -> CliResult {
    let profile = match Database::open_read_only()? {
        Some(db) => db.load_profile()?,
        None => None,
    };
    let columns = Config::load_or_default().widget.grid_columns;
    let content = WidgetContent::render(profile.as_ref(), args.family, Utc::now(), columns);
    print_json(&content)
}
