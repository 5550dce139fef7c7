//! CLI surface for cosplog.
//!
//! Thin handlers over the controller: every subcommand maps onto one
//! dispatched [`Action`](crate::app::Action). Parsing is forgiving where
//! it cheaply can be (sort keys and boolish flags are case-tolerant).

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, builder::BoolishValueParser};

use crate::app::App;
use crate::config;
use crate::core::SortKey;
use crate::store::{FileKv, Storage};
use crate::{Result, paths};

mod commands;

// =============================================================================
// Entry + global options
// =============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "cosplog",
    version,
    about = "Local catalog for tracking cosplay projects",
    infer_subcommands = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Machine-readable JSON output.
    #[arg(
        long,
        global = true,
        default_value_t = false,
        num_args = 0..=1,
        value_parser = BoolishValueParser::new()
    )]
    pub json: bool,

    /// Data directory holding the project store (default: XDG data dir).
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Errors only.
    #[arg(short = 'q', long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new project.
    #[command(alias = "new")]
    Add(AddArgs),

    /// Edit an existing project; unspecified flags keep prior values.
    #[command(alias = "edit")]
    Update(UpdateArgs),

    /// Show one project.
    Show { id: String },

    /// List projects.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Summary statistics (count, total hours, total cost).
    Stats,

    /// Delete a project.
    #[command(alias = "rm")]
    Delete { id: String },

    /// Append a handful of sample projects.
    Seed,

    /// Delete every project (requires --force).
    Clear(ClearArgs),
}

// =============================================================================
// Per-command args
// =============================================================================

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Character name; empty renders as "unnamed".
    #[arg(default_value = "")]
    pub character: String,

    #[arg(long)]
    pub series: Option<String>,

    /// Build category (armor, sewing, props, ...).
    #[arg(long)]
    pub category: Option<String>,

    /// Build status (planning, in-progress, done, ...).
    #[arg(long)]
    pub status: Option<String>,

    /// Hours spent; non-numeric input counts as 0.
    #[arg(long)]
    pub hours: Option<String>,

    /// Cost so far; non-numeric input counts as 0.
    #[arg(long)]
    pub cost: Option<String>,

    /// Calendar date (YYYY-MM-DD preferred, free text kept as-is).
    #[arg(long)]
    pub date: Option<String>,

    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub favorite: Option<bool>,

    /// Materials notes.
    #[arg(long)]
    pub materials: Option<String>,

    /// Reference image file to encode and store inline.
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub character: Option<String>,

    #[arg(long)]
    pub series: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub hours: Option<String>,

    #[arg(long)]
    pub cost: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub favorite: Option<bool>,

    #[arg(long)]
    pub materials: Option<String>,

    /// New reference image; omit to keep the stored one.
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Display order: date-asc, date-desc, character-asc, character-desc,
    /// hours-asc, hours-desc, cost-asc, cost-desc.
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Only projects in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Only projects with this status.
    #[arg(long)]
    pub status: Option<String>,

    /// Only favorites.
    #[arg(long, default_value_t = false)]
    pub favorites: bool,
}

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Actually clear; without this the command refuses.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

// =============================================================================
// Runner
// =============================================================================

/// Output preferences shared by the handlers.
pub(crate) struct Ctx {
    pub json: bool,
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::parse_from(args)
}

pub fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_or_init();

    // CLI flag > COSPLOG_DATA_DIR > config > XDG default. paths::data_dir
    // already prefers the env var.
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| {
            std::env::var_os("COSPLOG_DATA_DIR")
                .filter(|v| !v.is_empty())
                .map(|_| paths::data_dir())
        })
        .or_else(|| cfg.data_dir.clone())
        .unwrap_or_else(paths::data_dir);
    tracing::debug!(dir = %data_dir.display(), "using data directory");

    let storage = Storage::new(FileKv::in_dir(&data_dir));
    let mut app = App::new(storage, cfg.default_sort, cfg.image.limits());
    let ctx = Ctx { json: cli.json };

    match cli.command {
        Commands::Add(args) => commands::add::handle(&mut app, &ctx, args),
        Commands::Update(args) => commands::update::handle(&mut app, &ctx, args),
        Commands::Show { id } => commands::show::handle(&mut app, &ctx, &id),
        Commands::List(args) => commands::list::handle(&mut app, &ctx, args),
        Commands::Stats => commands::stats::handle(&mut app, &ctx),
        Commands::Delete { id } => commands::delete::handle(&mut app, &ctx, &id),
        Commands::Seed => commands::seed::handle(&mut app, &ctx),
        Commands::Clear(args) => commands::clear::handle(&mut app, &ctx, args),
    }
}

/// Parse a `--sort` value, tolerant of case.
pub(crate) fn parse_sort(raw: &str) -> Result<SortKey> {
    Ok(SortKey::parse(raw)?)
}
