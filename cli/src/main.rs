//! Headless runner for the traffic flow core
//!
//! Runs a fixed number of ticks at a fixed timestep, logs jam notifications
//! and prints a run summary.

mod args;
mod logging;
mod runner;

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use args::CommandLineArgs;

fn main() -> ExitCode {
    let args = CommandLineArgs::parse();
    let _guard = logging::init_std_out_logging(&args.log_level);
    info!("Started with args: {:?}", args);

    match runner::run(&args) {
        Ok(summary) => {
            if args.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("failed to serialize summary: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", summary);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
