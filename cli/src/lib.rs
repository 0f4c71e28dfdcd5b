//! `leap` on the command line: files are opened in a
//! [`MemoryHost`](leap_core::memory::MemoryHost), the query is replayed one
//! keystroke at a time and the outcome is printed.

mod render;
mod workspace;

pub use render::Location;
pub use render::Marker;
pub use render::Outcome;
pub use render::RenderedLine;
pub use render::RenderedView;

use anyhow::Result;
use anyhow::anyhow;
use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use leap_core::Leap;
use leap_core::LeapCommand;
use leap_core::LeapConfig;
use leap_core::SessionEvent;
use leap_core::SessionState;
use leap_core::host::Position;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "leap",
    version,
    about = "Jump to visible text by typing two characters and a label"
)]
pub struct Cli {
    /// Two anchor characters, optionally followed by label characters.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Open a file in its own view (repeatable). The first one has focus.
    #[arg(long = "file", value_name = "PATH", action = ArgAction::Append)]
    pub files: Vec<PathBuf>,

    /// Open two files side by side in a comparison view.
    #[arg(long = "diff", num_args = 2, value_names = ["ORIGINAL", "MODIFIED"])]
    pub diff: Option<Vec<PathBuf>>,

    /// Caret position in the focused view (1-based).
    #[arg(long = "cursor", value_name = "LINE:COL", value_parser = parse_cursor)]
    pub cursor: Option<Position>,

    /// Lines visible in every view (1-based, inclusive).
    #[arg(long = "viewport", value_name = "START:END", value_parser = parse_viewport)]
    pub viewport: Option<Range<usize>>,

    /// Which side of the caret to search in the focused view.
    #[arg(long = "direction", value_enum, default_value_t = Direction::Both)]
    pub direction: Direction,

    /// Search every open view, not only the focused one.
    #[arg(long = "all-editors")]
    pub all_editors: bool,

    /// Match case even when the anchor is all lowercase.
    #[arg(long = "case-sensitive")]
    pub case_sensitive: bool,

    /// Jump to the first remaining candidate once the query is typed.
    #[arg(long = "accept")]
    pub accept: bool,

    /// Print the outcome as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Read settings from this file instead of `$LEAP_HOME/config.toml`.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    Both,
}

impl Direction {
    fn command(self) -> LeapCommand {
        match self {
            Direction::Forward => LeapCommand::ForwardSearch,
            Direction::Backward => LeapCommand::BackwardSearch,
            Direction::Both => LeapCommand::Search,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Outcome> {
    let mut config = match &cli.config {
        Some(path) => LeapConfig::load(path)?,
        None => LeapConfig::load_from_home()?,
    };
    config.all_editors |= cli.all_editors;
    config.case_sensitive |= cli.case_sensitive;

    let host = Arc::new(workspace::open(cli)?);
    let mut leap = Leap::new(Arc::clone(&host), config);
    leap.start(cli.direction.command())?;

    let mut state = SessionState::Idle;
    for end in cli.query.char_indices().map(|(idx, ch)| idx + ch.len_utf8()) {
        let typed = cli.query[..end].to_string();
        debug!(query = %typed, "query changed");
        if let Some(next) = leap.handle(SessionEvent::QueryChanged(typed)) {
            state = next;
        }
        if state.is_terminal() {
            break;
        }
    }
    if cli.accept && !state.is_terminal() {
        if let Some(next) = leap.handle(SessionEvent::Accept) {
            state = next;
        }
    }

    let landed = leap.settle().await;
    let outcome = match state {
        SessionState::Idle => Outcome::Idle,
        SessionState::Scanning | SessionState::Narrowing => Outcome::narrowing(&host),
        SessionState::Jumped => Outcome::jumped(&host, landed),
        SessionState::Cancelled => Outcome::Cancelled,
    };
    leap.close();
    Ok(outcome)
}

fn parse_pair(value: &str) -> Result<(usize, usize)> {
    let (first, second) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("expected two numbers separated by ':'"))?;
    let first: usize = first.trim().parse()?;
    let second: usize = second.trim().parse()?;
    if first == 0 || second == 0 {
        return Err(anyhow!("positions start at 1"));
    }
    Ok((first, second))
}

fn parse_cursor(value: &str) -> Result<Position, String> {
    let (line, column) = parse_pair(value).map_err(|err| format!("{err}"))?;
    Ok(Position::new(line - 1, column - 1))
}

fn parse_viewport(value: &str) -> Result<Range<usize>, String> {
    let (start, end) = parse_pair(value).map_err(|err| format!("{err}"))?;
    if end < start {
        return Err(format!("viewport ends before it starts: {value}"));
    }
    Ok(start - 1..end)
}
