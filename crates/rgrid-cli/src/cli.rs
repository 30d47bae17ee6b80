//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rgrid_core::View;

use crate::commands::util::MAX_RANGE_DAYS;

/// Resource calendar grid.
///
/// Groups events by resource and lays out the date × resource header of a
/// multi-resource calendar view.
#[derive(Debug, Parser)]
#[command(name = "rgrid", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show events grouped by resource.
    Group(GroupArgs),

    /// Show the header layout for a date range.
    Header(HeaderArgs),

    /// Click a column's date label and show the resulting navigation.
    Drilldown(DrilldownArgs),
}

#[derive(Debug, Args)]
pub struct GroupArgs {
    /// JSON file with `resources` and `events`.
    #[arg(long)]
    pub data: PathBuf,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HeaderArgs {
    /// JSON file with `resources` and `events`.
    #[arg(long)]
    pub data: PathBuf,

    /// First date of the range (YYYY-MM-DD, "today", or "N days ago").
    #[arg(long)]
    pub start: String,

    /// Number of dates in the range.
    #[arg(long, default_value_t = 7, value_parser = days_in_range())]
    pub days: u32,

    /// Override "now" (defaults to the local clock).
    #[arg(long)]
    pub today: Option<String>,

    /// The content area shows a vertical scrollbar.
    #[arg(long)]
    pub overflowing: bool,

    /// Right-to-left layout (overrides config).
    #[arg(long)]
    pub rtl: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DrilldownArgs {
    /// First date of the range.
    #[arg(long)]
    pub start: String,

    /// Number of dates in the range.
    #[arg(long, default_value_t = 7, value_parser = days_in_range())]
    pub days: u32,

    /// Zero-based column whose label is clicked.
    #[arg(long, default_value_t = 0)]
    pub column: usize,

    /// Target view (overrides config).
    #[arg(long)]
    pub view: Option<View>,
}

fn days_in_range() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(0..=i64::from(MAX_RANGE_DAYS))
}
