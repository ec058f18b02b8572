//! ICP-Brasil API demonstration client
//!
//! Runs one canned scenario against the signature service and exits
//! non-zero as soon as a step fails.

mod cli;

use clap::Parser;
use std::process::ExitCode;

use cli::Cli;
use icp_core::{Demo, Reporter};

#[tokio::main]
async fn main() -> ExitCode {
    icp_core::init_logging();

    let cli = Cli::parse();
    let scenario = cli.scenario;
    let config = cli.into_config();

    let mut demo = match Demo::new(config, std::io::stdout()) {
        Ok(demo) => demo,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start demo");
            let _ = Reporter::new(std::io::stdout()).failure(&e);
            return ExitCode::FAILURE;
        }
    };

    match demo.run(scenario).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(scenario = %scenario, error = %e, "Scenario failed");
            let _ = demo.reporter().failure(&e);
            ExitCode::FAILURE
        }
    }
}
