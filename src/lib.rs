//! nic-prio: network interface priority editor
//!
//! A library for enumerating a host's network interfaces and
//! re-prioritizing them by rewriting their IPv4 route metrics. The core is
//! the enumeration and metric-reconciliation engine in [`network`]; the
//! [`privilege`] gate guards the mutating entry path.

pub mod cli;
pub mod network;
pub mod privilege;
