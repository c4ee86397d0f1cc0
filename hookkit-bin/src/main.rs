use clap::Parser;
use hookkit_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };

    // A hook must never fail its host: errors are logged and the exit code stays 0.
    if let Err(e) = cli.run().await {
        tracing::debug!(error = %e, "hook failed");
    }
}
