//! Platform-specific [`NetworkProvider`] implementations.
//!
//! Only Windows is implemented: the metric model (`UseAutomaticMetric`,
//! per-interface routing rows) is a Windows concept. The provider trait is
//! the seam a future port would fill in.
//!
//! [`NetworkProvider`]: super::NetworkProvider

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::WindowsProvider;

#[cfg(windows)]
pub use windows::WindowsProvider as PlatformProvider;

#[cfg(not(windows))]
mod unsupported {
    use crate::network::InterfaceId;
    use crate::network::provider::{EnumerationError, NetworkProvider, RawAdapter, UpdateError};

    /// Placeholder provider for platforms without an implementation.
    ///
    /// Every operation fails with a platform error; the privilege gate
    /// already refuses to run on these platforms, so this only exists to
    /// keep the binary compiling for non-Windows targets.
    #[derive(Debug, Clone, Default)]
    pub struct UnsupportedProvider {
        _private: (),
    }

    impl UnsupportedProvider {
        /// Creates the placeholder provider.
        #[must_use]
        pub const fn new() -> Self {
            Self { _private: () }
        }
    }

    impl NetworkProvider for UnsupportedProvider {
        fn enumerate(&self) -> Result<Vec<RawAdapter>, EnumerationError> {
            Err(EnumerationError::Platform {
                message: "adapter enumeration is only supported on Windows".to_string(),
            })
        }

        fn set_metric(&self, _: InterfaceId, _: u32, _: bool) -> Result<(), UpdateError> {
            Err(UpdateError::Platform {
                message: "metric updates are only supported on Windows".to_string(),
            })
        }
    }
}

#[cfg(not(windows))]
pub use unsupported::UnsupportedProvider as PlatformProvider;
