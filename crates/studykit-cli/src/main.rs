//! `studykit` entry point - the composition root.
//!
//! Everything below `bootstrap` is driven through `CliApplication::execute`;
//! the process exit code mirrors the returned result.

use studykit_cli::{CliConfig, bootstrap, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    init_logging();

    let config = match CliConfig::with_defaults() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code());
        }
    };
    let app = bootstrap(config)?;

    let result = app.execute(std::env::args().skip(1)).await;
    tracing::debug!(success = result.success, message = %result.message, "Finished");

    std::process::exit(result.exit_code());
}
