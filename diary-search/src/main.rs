//! Demo binary entry point.

use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use diary_search::cli::{Cli, Commands};
use diary_search::{DemoError, Dependencies};
use diary_search_workflow::DemoWorkflow;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        error!(error = %e, "Demo failed");
        process::exit(e.exit_code());
    }
}

/// Run the selected workflow.
///
/// The exit code is decided in `main`, at the single process boundary; the
/// workflows themselves only propagate errors.
async fn run(cli: &Cli) -> Result<(), DemoError> {
    let deps = Dependencies::new(cli).await?;

    match cli.command {
        Commands::Stats => {
            let body = deps.http.fetch_stats().await?;
            println!("{}", body);
        }
        Commands::Demo => {
            let workflow = DemoWorkflow::new(deps.store.clone());
            let report = workflow.run().await?;
            info!(
                bulk_items = report.bulk_items,
                hits = report.hits.len(),
                async_id = ?report.async_note.as_ref().and_then(|n| n.id.as_deref()),
                "Demo sequence completed"
            );
        }
    }

    Ok(())
}
