//! Terminal front end for the knowledge-base endpoint

use crate::error::CliError;
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use wt_navigation::{
    load_all_weeks, Direction, NavigationController, NavigationError, PageView, PaginationStrategy,
    ViewModel, WeekSource,
};

const PROMPT: &str = "[p] previous  [n] next  [r] reload  [q] quit > ";

/// Browser command read from input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Move one week
    Step(Direction),
    /// Reload the displayed week
    Reload,
    /// Leave
    Quit,
}

impl BrowseCommand {
    /// Parse one input line; `None` for anything unrecognised
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "prev" | "previous" => Some(Self::Step(Direction::Previous)),
            "n" | "next" => Some(Self::Step(Direction::Next)),
            "r" | "reload" => Some(Self::Reload),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Run `strategy` against `source`, reading commands from `input`
///
/// # Errors
/// Terminal I/O failures. Load failures are displayed, not returned, except
/// when every week of the all-weeks listing failed.
pub async fn browse<S, R, W>(
    source: S,
    strategy: PaginationStrategy,
    input: R,
    out: &mut W,
) -> Result<(), CliError>
where
    S: WeekSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match strategy {
        PaginationStrategy::Paged => browse_paged(source, input, out).await,
        PaginationStrategy::AllWeeks { count } => {
            let view = load_all_weeks(&source, count).await;
            write!(out, "{view}")?;
            if view.is_total_failure() {
                let first = view.failed.first().map(|f| f.message.as_str()).unwrap_or_default();
                writeln!(out, "Error loading data: {first}")?;
                return Err(CliError::NothingLoaded { weeks: count });
            }
            Ok(())
        }
    }
}

async fn browse_paged<S, R, W>(source: S, input: R, out: &mut W) -> Result<(), CliError>
where
    S: WeekSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut controller = NavigationController::new(source);
    let mut updates = controller.subscribe();
    // Failures are published as the error panel.
    let _ = settle(controller.load_initial(), &mut updates, out).await?;
    write!(out, "{}", controller.view())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = match BrowseCommand::parse(&line) {
            Some(BrowseCommand::Quit) => break,
            Some(BrowseCommand::Step(direction)) => {
                settle(controller.navigate(direction), &mut updates, out).await?
            }
            Some(BrowseCommand::Reload) => settle(controller.reload(), &mut updates, out).await?,
            None => {
                if !line.trim().is_empty() {
                    writeln!(out, "Unknown command: {}", line.trim())?;
                }
                continue;
            }
        };

        match outcome {
            Err(NavigationError::AtCurrentWeek) => {
                writeln!(out, "Already showing the current week.")?;
            }
            _ => write!(out, "{}", controller.view())?,
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Await a transition, printing the loading view while it is in flight
async fn settle<F, W>(
    transition: F,
    updates: &mut watch::Receiver<ViewModel>,
    out: &mut W,
) -> Result<Result<PageView, NavigationError>, CliError>
where
    F: Future<Output = Result<PageView, NavigationError>>,
    W: Write,
{
    tokio::pin!(transition);
    loop {
        tokio::select! {
            outcome = &mut transition => return Ok(outcome),
            Ok(()) = updates.changed() => {
                let view = updates.borrow_and_update().clone();
                if view.is_loading() {
                    write!(out, "{view}")?;
                    out.flush()?;
                }
            }
        }
    }
}
