use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tcpfwd::config::{self, Config};
use tcpfwd::{BindPolicy, Supervisor};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Forward local TCP ports to remote addresses
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// config file with parallel `source` / `target` arrays
    #[arg(short, long, default_value = config::DEFAULT_PATH)]
    config: PathBuf,

    /// `fatal` stops startup on the first listener that fails to bind,
    /// `isolate` skips it and serves the remaining rules
    #[arg(long, default_value_t = BindPolicy::Fatal)]
    on_bind_failure: BindPolicy,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> tcpfwd::Result<()> {
    let rules = Config::load_or_create(&args.config)?.rules()?;
    let running = Supervisor::new(rules, args.on_bind_failure).start().await?;
    running.wait().await;
    Ok(())
}
