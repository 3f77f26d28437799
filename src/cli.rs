//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// nic-prio: network interface priority editor
///
/// Lists the host's network interfaces and re-prioritizes them by
/// rewriting their IPv4 route metrics. Requires administrator rights for
/// metric changes; the tool relaunches itself elevated when needed.
#[derive(Debug, Parser)]
#[command(name = "nic-prio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (defaults to `list`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for nic-prio
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print interface names one per line, in enumeration order
    List {
        /// Print a human-readable table with addresses, gateways, DNS and
        /// metric instead of bare names
        #[arg(long)]
        detail: bool,

        /// Emit the structured snapshot as JSON
        #[arg(long, conflicts_with = "detail")]
        json: bool,
    },

    /// Apply a priority order: read an ordered name list (one per line)
    /// and assign metrics 10, 20, 30, ... in that order
    Apply {
        /// Read the ordered list from this file instead of stdin
        #[arg(long, short, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
