//! Network layer: snapshot enumeration, metric reconciliation, and the
//! line-oriented codec for the operator-facing name list.
//!
//! - [`Interface`] — immutable value snapshot of one adapter
//! - [`NetworkProvider`] — capability boundary to the OS routing facilities
//! - [`snapshot`] — builds `Interface` values from raw adapter records
//! - [`reconcile`] — name matching and metric assignment
//! - [`codec`] — text in/out for the presentation surface
//! - [`platform`] — platform-specific provider implementations

pub mod codec;
mod interface;
pub mod platform;
pub mod provider;
pub mod reconcile;
pub mod snapshot;

pub use interface::{Interface, InterfaceId};
pub use provider::{EnumerationError, NetworkProvider, RawAdapter, UpdateError};
pub use reconcile::{apply_order, ReconcileReport};
pub use snapshot::enumerate_interfaces;
