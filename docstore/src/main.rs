use clap::Parser;
use dotenv::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use docstore::cli::{run, Cli};
use docstore::{AppError, AppSettings, Dependencies};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match execute(cli).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!(error = %e, "Command failed");
            std::process::exit(1);
        }
    }
}

async fn execute(cli: Cli) -> Result<String, AppError> {
    let settings = AppSettings::from_env()?;
    let dependencies = Dependencies::new(&settings).await?;

    info!(command = ?cli.command, "Running command");
    let result = run(cli.command, &dependencies.store).await?;

    Ok(serde_json::to_string_pretty(&result)?)
}

/// Logs go to stderr so command output stays machine readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
