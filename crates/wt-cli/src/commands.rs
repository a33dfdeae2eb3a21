//! Command line definition and dispatch

use crate::browse::browse;
use crate::config::TrackerConfig;
use crate::error::CliError;
use crate::export::export_weeks;
use crate::logging::{self, LogFormat};
use crate::report::{write_header, write_pages};
use crate::server::serve;
use chrono::Local;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use wt_calendar::WeekWindow;
use wt_http::{CacheStrategy, ResilientClient};
use wt_navigation::{KnowledgeBaseClient, PaginationStrategy};
use wt_workspace::{NotionApi, RecordFetcher};

const AFTER_HELP: &str = "\
Examples:
  $ weekly-tracker                 # Show pages from this week
  $ weekly-tracker -w 1            # Show pages from last week
  $ weekly-tracker -w 2            # Show pages from 2 weeks ago
  $ weekly-tracker export          # Write ./docs/data/week-0.json .. week-9.json
  $ weekly-tracker serve           # Serve /knowledge-base on 127.0.0.1:3000
  $ weekly-tracker browse --all    # List the last 10 weeks from the server";

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print one week's report
    Report {
        /// Weeks before the current one
        weeks_ago: u32,
    },
    /// Write `week-<N>.json` files
    Export {
        /// Number of weeks; config default when absent
        weeks: Option<u32>,
        /// Output directory; config default when absent
        out: Option<PathBuf>,
    },
    /// Run the knowledge-base server
    Serve {
        /// Bind address; config default when absent
        bind: Option<String>,
    },
    /// Browse the knowledge-base endpoint in the terminal
    Browse {
        /// Endpoint root; config default when absent
        api_base: Option<String>,
        /// Paged or all-weeks listing
        strategy: PaginationStrategy,
        /// Disable the response cache
        no_cache: bool,
    },
}

/// Options shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// `-v` count
    pub verbosity: u8,
    /// Log line format
    pub log_format: LogFormat,
}

/// Command line definition
#[must_use]
pub fn cli() -> Command {
    Command::new("weekly-tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track new workspace pages by week")
        .after_help(AFTER_HELP)
        .arg(
            Arg::new("weeks")
                .short('w')
                .long("weeks")
                .value_name("NUMBER")
                .default_value("0")
                .value_parser(value_parser!(u32))
                .help("Number of weeks ago (0 = this week, 1 = last week, etc.)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: ./weekly-tracker.toml if present)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Log line format"),
        )
        .subcommand(
            Command::new("export")
                .about("Write one JSON file per week")
                .arg(
                    Arg::new("weeks")
                        .long("weeks")
                        .value_name("COUNT")
                        .value_parser(value_parser!(u32))
                        .help("Number of weeks to export (default 10)"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory (default ./docs/data)"),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve GET /knowledge-base?weeksAgo=<n>")
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .value_name("ADDR")
                        .help("Listen address (default 127.0.0.1:3000)"),
                ),
        )
        .subcommand(
            Command::new("browse")
                .about("Page through weeks served by the knowledge-base endpoint")
                .arg(
                    Arg::new("api-base")
                        .long("api-base")
                        .value_name("URL")
                        .help("Endpoint root (default http://127.0.0.1:3000)"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .value_name("WEEKS")
                        .num_args(0..=1)
                        .default_missing_value("10")
                        .value_parser(value_parser!(u32))
                        .help("List the last WEEKS weeks at once instead of paging"),
                )
                .arg(
                    Arg::new("no-cache")
                        .long("no-cache")
                        .action(ArgAction::SetTrue)
                        .help("Fetch every week from the server, even if seen recently"),
                ),
        )
}

impl GlobalOptions {
    /// Read global options from parsed arguments
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let log_format = match matches.get_one::<String>("log-format").map(String::as_str) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            verbosity: matches.get_count("verbose"),
            log_format,
        }
    }
}

impl Action {
    /// Read the requested action from parsed arguments
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        match matches.subcommand() {
            Some(("export", args)) => Self::Export {
                weeks: args.get_one::<u32>("weeks").copied(),
                out: args.get_one::<PathBuf>("out").cloned(),
            },
            Some(("serve", args)) => Self::Serve {
                bind: args.get_one::<String>("bind").cloned(),
            },
            Some(("browse", args)) => Self::Browse {
                api_base: args.get_one::<String>("api-base").cloned(),
                strategy: args
                    .get_one::<u32>("all")
                    .map_or(PaginationStrategy::Paged, |&count| {
                        PaginationStrategy::AllWeeks { count }
                    }),
                no_cache: args.get_flag("no-cache"),
            },
            _ => Self::Report {
                weeks_ago: matches.get_one::<u32>("weeks").copied().unwrap_or(0),
            },
        }
    }

    /// Apply this action's command-line overrides to `config`
    #[must_use]
    pub fn configure(&self, mut config: TrackerConfig) -> TrackerConfig {
        match self {
            Self::Report { .. } => {}
            Self::Export { weeks, out } => {
                if let Some(weeks) = weeks {
                    config = config.with_export_weeks(*weeks);
                }
                if let Some(out) = out {
                    config = config.with_export_dir(out.as_path());
                }
            }
            Self::Serve { bind } => {
                if let Some(bind) = bind {
                    config = config.with_bind(bind.as_str());
                }
            }
            Self::Browse { api_base, no_cache, .. } => {
                if let Some(api_base) = api_base {
                    config = config.with_api_base(api_base.as_str());
                }
                if *no_cache {
                    config = config.with_cache_ttl(Duration::ZERO);
                }
            }
        }
        config
    }
}

/// Workspace fetcher configured from `config`
///
/// # Errors
/// Missing credential or HTTP client setup failure.
pub fn workspace_fetcher(config: &TrackerConfig) -> Result<RecordFetcher<NotionApi>, CliError> {
    let token = config.require_token()?;
    let client = ResilientClient::reqwest(config.request_timeout())?
        .with_retry_policy(config.retry_policy())
        .with_cache_strategy(CacheStrategy::Disabled);
    let api = NotionApi::new(client, token)
        .with_base_url(config.notion_base_url.as_str())
        .with_version(config.notion_version.as_str());
    Ok(RecordFetcher::new(api).with_max_search_pages(config.max_search_pages))
}

/// Knowledge-base client configured from `config`
///
/// # Errors
/// HTTP client setup failure.
pub fn knowledge_base_client(config: &TrackerConfig) -> Result<KnowledgeBaseClient, CliError> {
    let client = ResilientClient::reqwest(config.request_timeout())?
        .with_retry_policy(config.retry_policy())
        .with_cache_strategy(config.cache_strategy());
    Ok(KnowledgeBaseClient::new(client, config.api_base.as_str()))
}

/// Parse-independent entry point used by the binary
///
/// # Errors
/// Whatever the selected command fails with.
pub async fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let globals = GlobalOptions::from_matches(matches);
    logging::init(globals.verbosity, globals.log_format);

    let config = TrackerConfig::load(globals.config.as_deref())?;
    execute(Action::from_matches(matches), &config).await
}

/// Run `action` with `config`
///
/// # Errors
/// Whatever the selected command fails with.
pub async fn execute(action: Action, config: &TrackerConfig) -> Result<(), CliError> {
    tracing::debug!("Running {:?}", action);
    let config = &action.configure(config.clone());
    let mut stdout = std::io::stdout();

    match action {
        Action::Report { weeks_ago } => {
            let now = Local::now();
            let window = WeekWindow::at(&now, weeks_ago);
            write_header(&mut stdout, &window.label(), &window.date_range())?;

            let fetcher = workspace_fetcher(config)?;
            let report = fetcher.collect_week(&now, weeks_ago).await?;
            write_pages(&mut stdout, &report.pages)?;
        }
        Action::Export { .. } => {
            let fetcher = workspace_fetcher(config)?;
            let (weeks, dir) = (config.export_weeks, &config.export_dir);
            export_weeks(&fetcher, &Local::now(), weeks, dir, &mut stdout).await?;
        }
        Action::Serve { .. } => {
            let fetcher = workspace_fetcher(config)?;
            serve(fetcher, &config.bind).await?;
        }
        Action::Browse { strategy, .. } => {
            let source = knowledge_base_client(config)?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            browse(source, strategy, input, &mut stdout).await?;
        }
    }

    stdout.flush()?;
    Ok(())
}
