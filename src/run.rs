//! Command execution: the `list` and `apply` flows.
//!
//! Both flows enumerate their own fresh snapshot. An `apply` never reuses
//! a snapshot from an earlier `list`, since adapters can appear or vanish
//! between the two.

use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use nic_prio::cli::Command;
use nic_prio::network::reconcile::ReconcileReport;
use nic_prio::network::{
    EnumerationError, Interface, NetworkProvider, apply_order, codec, enumerate_interfaces,
};
use nic_prio::privilege::Elevation;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Snapshot enumeration failed; no partial list exists.
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    /// The ordered name list could not be read.
    #[error("Cannot read priority order from '{}': {source}", path.display())]
    OrderRead {
        /// Where the list was read from ("-" for stdin).
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON listing could not be serialized.
    #[error("Cannot serialize interface list: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more per-interface metric writes failed during a pass that
    /// otherwise ran to completion.
    #[error("{failed} interface update(s) failed")]
    UpdatesFailed {
        /// Number of failed writes.
        failed: usize,
    },
}

/// Result of a gated dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The command ran to completion.
    Completed,
    /// The process is unprivileged: no enumeration or mutation was
    /// attempted, and the caller must hand off to an elevated relaunch.
    ElevationRequired,
}

/// Runs a parsed command against `provider`, gated on `elevation`.
///
/// An unprivileged process returns [`Dispatch::ElevationRequired`]
/// before touching the provider at all: zero enumeration and zero
/// mutation happen in that process instance.
pub fn dispatch<P: NetworkProvider>(
    elevation: Elevation,
    provider: &P,
    command: &Command,
) -> Result<Dispatch, RunError> {
    if !elevation.is_elevated() {
        return Ok(Dispatch::ElevationRequired);
    }

    match command {
        Command::List { detail, json } => list(provider, *detail, *json)?,
        Command::Apply { file } => apply(provider, file.as_deref())?,
    }

    Ok(Dispatch::Completed)
}

/// Runs the `list` command.
fn list<P: NetworkProvider>(provider: &P, detail: bool, json: bool) -> Result<(), RunError> {
    let interfaces = enumerate_interfaces(provider)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&interfaces)?);
    } else if detail {
        print!("{}", detail_table(&interfaces));
    } else {
        print!("{}", codec::render(&interfaces));
    }

    Ok(())
}

/// Runs the `apply` command.
///
/// Reads the operator's ordered name list from `file` (or stdin when
/// `None`), then reconciles it against a fresh snapshot.
fn apply<P: NetworkProvider>(provider: &P, file: Option<&Path>) -> Result<(), RunError> {
    let text = read_order_text(file)?;
    let report = apply_text(provider, &text)?;
    summarize(report)
}

/// Parses the edited text and reconciles it against a fresh snapshot from
/// `provider`. Split out from [`apply`] so tests can inject a fake
/// provider.
fn apply_text<P: NetworkProvider>(provider: &P, text: &str) -> Result<ReconcileReport, RunError> {
    let names = codec::parse(text);
    let interfaces = enumerate_interfaces(provider)?;
    Ok(apply_order(provider, &interfaces, &names))
}

/// Logs the outcome of a pass and maps accumulated failures to an error.
fn summarize(report: ReconcileReport) -> Result<(), RunError> {
    if report.skipped > 0 {
        tracing::warn!(
            "{} name(s) matched no live interface and were skipped",
            report.skipped
        );
    }

    tracing::info!("{} interface(s) updated", report.applied.len());

    if report.is_clean() {
        Ok(())
    } else {
        Err(RunError::UpdatesFailed {
            failed: report.failures.len(),
        })
    }
}

/// Reads the ordered name list from a file, or from stdin when no file is
/// given.
fn read_order_text(file: Option<&Path>) -> Result<String, RunError> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| RunError::OrderRead {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| RunError::OrderRead {
                    path: PathBuf::from("-"),
                    source,
                })?;
            Ok(text)
        }
    }
}

/// Formats the detailed human-readable listing.
fn detail_table(interfaces: &[Interface]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for itf in interfaces {
        let addresses = join_addresses(&itf.ip_addresses);
        let gateways = join_addresses(&itf.gateways);
        let dns = join_addresses(&itf.dns_servers);
        let metric = if itf.automatic_metric {
            format!("{} (automatic)", itf.metric)
        } else {
            itf.metric.to_string()
        };
        let status = if itf.connected { "up" } else { "down" };

        // Infallible on String.
        let _ = writeln!(
            out,
            "{name}\n  description: {description}\n  status:      {status}\n  \
             addresses:   {addresses}/{prefix}\n  gateways:    {gateways}\n  \
             dns:         {dns}\n  dns suffix:  {suffix}\n  metric:      {metric}",
            name = itf.name,
            description = itf.description,
            prefix = itf.subnet_prefix_length,
            suffix = if itf.dns_suffix.is_empty() {
                "-"
            } else {
                itf.dns_suffix.as_str()
            },
        );
    }
    out
}

fn join_addresses(addresses: &[std::net::Ipv4Addr]) -> String {
    if addresses.is_empty() {
        return "-".to_string();
    }
    addresses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
