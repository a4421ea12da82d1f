use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - projects and tasks on a board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of ./taskdeck.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start without the sample projects and tasks
    #[arg(long, global = true)]
    pub empty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the project overview with dashboard totals
    Overview,
    /// Show the status board
    Board(BoardArgs),
    /// Show one task in detail
    Show(ShowArgs),
    /// Show one project's settings and members
    Project(ProjectArgs),
    /// Apply a JSON-lines intent script, then show the final screen
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct BoardArgs {
    /// Only show tasks whose title or description contains TERM
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID to show
    pub id: u64,
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Project ID to show
    pub id: u64,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Script file, one intent per line; `-` reads stdin
    pub file: String,
}
