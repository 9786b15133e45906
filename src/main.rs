//! db-select - run a single-table SELECT and print the rows as JSON.

use anyhow::Context;
use db_select::cli::Cli;
use db_select::config::load_dotenv;
use db_select::logging::init_stderr_logging;
use db_select::query::select;
use db_select::SelectError;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_stderr_logging(cli.verbose);

    if let Err(e) = run(&cli).await {
        match e.downcast_ref::<SelectError>() {
            Some(err) => error!("{}: {e:#}", err.category()),
            None => error!("{e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    load_dotenv(cli.env_file.as_deref())?;

    let request = cli.to_request();
    let selection = select(&request)
        .await
        .with_context(|| format!("select from '{}' on '{}' failed", request.table, request.db_key))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&selection)
    } else {
        serde_json::to_string(&selection)
    }
    .context("failed to serialize result")?;

    println!("{json}");
    Ok(())
}
