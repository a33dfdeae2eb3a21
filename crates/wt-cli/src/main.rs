use clap::error::ErrorKind;
use std::process::ExitCode;
use wt_cli::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let matches = match wt_cli::cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match wt_cli::run(&matches).await.map_err(anyhow::Error::from) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn report_failure(err: &anyhow::Error) {
    let missing_credential = err
        .downcast_ref::<CliError>()
        .is_some_and(CliError::is_missing_credential);

    if missing_credential {
        eprintln!("❌ Error: NOTION_TOKEN environment variable is required.");
        eprintln!("💡 Create a .env file with your Notion integration token:");
        eprintln!("   NOTION_TOKEN=your_token_here");
        eprintln!();
    } else {
        eprintln!("❌ Error: {err}");
    }
}
