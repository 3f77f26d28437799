//! nic-prio: network interface priority editor
//!
//! Entry point for the nic-prio binary.

use std::process::ExitCode;

use nic_prio::cli::{Cli, Command};
use nic_prio::network::platform::PlatformProvider;
use nic_prio::privilege;

mod app;
mod run;

use app::{exit_code, setup_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    // The gate runs once, before any enumeration or mutation. An
    // unprivileged instance hands off to an elevated relaunch and runs no
    // core logic of its own.
    let elevation = match privilege::check() {
        Ok(elevation) => elevation,
        Err(e) => {
            tracing::error!("Privilege check failed: {e}");
            return exit_code::runtime_error();
        }
    };

    let command = cli.command.unwrap_or(Command::List {
        detail: false,
        json: false,
    });

    let provider = PlatformProvider::default();

    match run::dispatch(elevation, &provider, &command) {
        Ok(run::Dispatch::Completed) => exit_code::SUCCESS,
        Ok(run::Dispatch::ElevationRequired) => relaunch_elevated(),
        Err(e) => {
            tracing::error!("{e}");
            match e {
                run::RunError::OrderRead { .. } => exit_code::USAGE_ERROR,
                _ => exit_code::runtime_error(),
            }
        }
    }
}

/// Hands off to an elevated instance and terminates this one, propagating
/// the elevated instance's exit code.
fn relaunch_elevated() -> ExitCode {
    tracing::info!("Not running as administrator, requesting elevation");

    match privilege::relaunch_elevated() {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX)),
        Err(e) => {
            tracing::error!("Elevation failed: {e}");
            exit_code::runtime_error()
        }
    }
}
