mod display;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use karefo_ai::{ArtifactBundle, ArtifactPaths, NerService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "karefo",
    version,
    about = "Classify out-of-vocabulary Tamil words into named-entity labels"
)]
struct Cli {
    /// Directory holding karky.nerMODEL, karky.nerVECT and karky.nerDICT.
    #[arg(long, env = "KAREFO_ARTIFACTS_DIR", default_value = ".", global = true)]
    artifacts_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one word and print the result.
    Lookup {
        word: String,
        /// Print the result as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },
    /// Serve lookups over HTTP at /karefoNER/{word}.
    Serve {
        #[arg(long, env = "KAREFO_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "KAREFO_PORT", default_value_t = 3013)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("karefo v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    // Load before serving anything; a failed load leaves the service degraded.
    let paths = ArtifactPaths::in_dir(&cli.artifacts_dir);
    let service = NerService::new(Arc::new(ArtifactBundle::load_or_degraded(&paths)));

    match cli.command {
        Command::Lookup { word, json } => {
            let result = service
                .lookup(&word)
                .with_context(|| format!("looking up {word:?}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display::print_result(&result);
            }
        }
        Command::Serve { host, port } => {
            server::serve(service, &host, port).await?;
        }
    }

    Ok(())
}
