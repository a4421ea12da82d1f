use std::fs;
use std::io::Read;

use crate::app::intent::Intent;
use crate::app::session::Session;
use crate::app::view::NavTarget;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, seed};
use crate::logging;
use crate::model::config::{SeedKind, TrackerConfig};
use crate::model::project::ProjectId;
use crate::model::task::TaskId;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    logging::init(&config.log.filter);

    let mut session = start_session(&config, cli.empty)?;

    match cli.command {
        Commands::Overview => cmd_overview(&mut session, json),
        Commands::Board(args) => cmd_board(&mut session, args, json),
        Commands::Show(args) => cmd_show(&mut session, args, json),
        Commands::Project(args) => cmd_project(&mut session, args, json),
        Commands::Replay(args) => cmd_replay(&mut session, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A fresh session seeded per config; `--empty` wins over the config
pub fn start_session(
    config: &TrackerConfig,
    empty: bool,
) -> Result<Session, Box<dyn std::error::Error>> {
    let kind = if empty {
        SeedKind::Empty
    } else {
        config.workspace.seed
    };
    let workspace = seed::seed_workspace(kind)?;
    Ok(Session::with_config(workspace, config))
}

fn print_snapshot(session: &Session, json: bool) -> CmdResult {
    let snapshot = session.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        for line in format_snapshot(&snapshot) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Screen commands
// ---------------------------------------------------------------------------

fn cmd_overview(session: &mut Session, json: bool) -> CmdResult {
    session.apply(Intent::Navigate {
        target: NavTarget::Overview,
    })?;
    print_snapshot(session, json)
}

fn cmd_board(session: &mut Session, args: BoardArgs, json: bool) -> CmdResult {
    if let Some(term) = args.search {
        session.apply(Intent::Search { term })?;
    }
    session.apply(Intent::Navigate {
        target: NavTarget::Board,
    })?;
    print_snapshot(session, json)
}

fn cmd_show(session: &mut Session, args: ShowArgs, json: bool) -> CmdResult {
    session.apply(Intent::SelectTask {
        id: TaskId(args.id),
    })?;
    print_snapshot(session, json)
}

fn cmd_project(session: &mut Session, args: ProjectArgs, json: bool) -> CmdResult {
    session.apply(Intent::SelectProject {
        id: ProjectId(args.id),
    })?;
    print_snapshot(session, json)
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

fn cmd_replay(session: &mut Session, args: ReplayArgs, json: bool) -> CmdResult {
    let script = if args.file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .map_err(|e| format!("could not read {}: {}", args.file, e))?
    };

    for (line_no, intent) in parse_script(&script)? {
        match session.apply(intent) {
            Ok(outcome) if json => println!("{}", serde_json::to_string(&outcome)?),
            Ok(outcome) => println!("{}", outcome),
            Err(e) if json => {
                println!("{}", serde_json::to_string(&RejectionJson::new(line_no, &e))?)
            }
            Err(e) => println!("{}", format_rejection(line_no, &e)),
        }
    }

    print_snapshot(session, json)
}

/// Parse a JSON-lines script up front, so a malformed line aborts before
/// anything is applied. Blank lines and `#` comments are skipped.
pub fn parse_script(script: &str) -> Result<Vec<(usize, Intent)>, String> {
    let mut intents = Vec::new();
    for (i, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let intent: Intent = serde_json::from_str(line)
            .map_err(|e| format!("line {}: invalid intent: {}", i + 1, e))?;
        intents.push((i + 1, intent));
    }
    Ok(intents)
}
