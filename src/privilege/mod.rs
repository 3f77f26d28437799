//! Privilege gate: one-shot elevation check at process start.
//!
//! Changing interface metrics is privileged, so the gate runs before any
//! enumeration or mutation. When the process is not elevated it relaunches
//! itself with the `runas` verb and the caller terminates this instance;
//! there is no de-elevation for the process lifetime.
//!
//! Elevation is an explicit value handed to the entry point rather than
//! ambient global state, so core logic stays testable with an injected
//! provider and never consults the gate itself.

use thiserror::Error;

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use self::windows::{check, relaunch_elevated};

/// Result of the startup elevation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    /// The process token is a member of the Administrators group.
    Elevated,
    /// Not elevated; the caller should relaunch and terminate.
    NotElevated,
}

impl Elevation {
    /// Returns true for [`Elevation::Elevated`].
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Elevated)
    }
}

/// Error type for the privilege gate.
///
/// Both variants are fatal at startup: if the check itself cannot
/// complete, no enumeration or mutation logic runs in this process.
#[derive(Debug, Error)]
pub enum PrivilegeError {
    /// The group-membership check could not complete.
    #[cfg(windows)]
    #[error("Cannot check administrator membership: {0}")]
    Check(#[source] ::windows::core::Error),

    /// The elevated relaunch could not be started or awaited.
    #[cfg(windows)]
    #[error("Cannot relaunch elevated: {0}")]
    Relaunch(#[source] ::windows::core::Error),

    /// The path of the running executable could not be determined.
    #[error("Cannot determine executable path: {0}")]
    Executable(#[source] std::io::Error),

    /// The privilege model is not implemented for this platform.
    #[cfg(not(windows))]
    #[error("Privilege elevation is only supported on Windows")]
    Unsupported,
}

/// Checks elevation on platforms without a privilege model.
///
/// # Errors
///
/// Always returns [`PrivilegeError::Unsupported`].
#[cfg(not(windows))]
pub fn check() -> Result<Elevation, PrivilegeError> {
    Err(PrivilegeError::Unsupported)
}

/// Relaunch stub for platforms without a privilege model.
///
/// # Errors
///
/// Always returns [`PrivilegeError::Unsupported`].
#[cfg(not(windows))]
pub fn relaunch_elevated() -> Result<u32, PrivilegeError> {
    Err(PrivilegeError::Unsupported)
}

/// Joins command-line arguments into one parameter string such that
/// `CommandLineToArgvW` in the relaunched process parses them back into
/// the original arguments.
#[cfg_attr(not(windows), allow(dead_code))]
fn join_arguments<I>(args: I) -> String
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| quote_argument(&arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quotes one argument using the `CommandLineToArgvW` rules: arguments
/// containing spaces, tabs or quotes are wrapped in double quotes, a
/// run of n backslashes before a quote becomes 2n+1 backslashes, and a
/// run of n trailing backslashes becomes 2n so the closing quote is not
/// escaped.
#[cfg_attr(not(windows), allow(dead_code))]
fn quote_argument(arg: &str) -> String {
    let needs_quoting = arg.is_empty() || arg.contains([' ', '\t', '"']);
    if !needs_quoting {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');

    let mut backslashes = 0usize;
    for ch in arg.chars() {
        match ch {
            '\\' => backslashes += 1,
            '"' => {
                quoted.extend(std::iter::repeat_n('\\', backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            other => {
                quoted.extend(std::iter::repeat_n('\\', backslashes));
                quoted.push(other);
                backslashes = 0;
            }
        }
    }

    quoted.extend(std::iter::repeat_n('\\', backslashes * 2));
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevated_is_elevated() {
        assert!(Elevation::Elevated.is_elevated());
        assert!(!Elevation::NotElevated.is_elevated());
    }

    #[test]
    fn plain_arguments_pass_through_unquoted() {
        assert_eq!(quote_argument("apply"), "apply");
        assert_eq!(quote_argument("--verbose"), "--verbose");
    }

    #[test]
    fn arguments_with_spaces_are_quoted() {
        assert_eq!(
            quote_argument(r"C:\My Files\order.txt"),
            r#""C:\My Files\order.txt""#
        );
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        assert_eq!(quote_argument(r#"say "hi""#), r#""say \"hi\"""#);
    }

    #[test]
    fn backslashes_before_a_quote_are_doubled_plus_one() {
        assert_eq!(quote_argument(r#"a\"b"#), r#""a\\\"b""#);
    }

    #[test]
    fn trailing_backslashes_are_doubled() {
        assert_eq!(quote_argument(r"C:\My Files\"), r#""C:\My Files\\""#);
    }

    #[test]
    fn empty_argument_stays_a_distinct_argument() {
        assert_eq!(quote_argument(""), r#""""#);
    }

    #[test]
    fn joined_arguments_keep_one_string_per_argument() {
        let joined = join_arguments(
            ["apply", "--file", r"C:\My Files\order.txt"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(joined, r#"apply --file "C:\My Files\order.txt""#);
    }
}
