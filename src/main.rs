use clap::Parser;
use feed_fetch::{Cli, FeedRunner};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runner = match FeedRunner::new(cli.into_config()) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Fatal errors exit non-zero; per-item failures only show up in the log
    match runner.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins over --verbose
    let default_filter = if verbose {
        "info,feed_fetch=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
