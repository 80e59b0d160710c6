//! Defines the crate-wide error type.

use thiserror::Error;

/// The primary error type for every dialog operation.
///
/// Cancellation is deliberately *not* represented here: a user dismissing a
/// dialog is a routine outcome and surfaces as `Ok(None)` from the
/// operation, never as an error. This enum covers failures of the native
/// mechanism itself.
#[derive(Debug, Error)]
pub enum DialogError {
    /// The helper process could not be launched for a reason other than the
    /// binary being absent.
    #[error("failed to launch `{1}`: {0}")]
    Spawn(#[source] std::io::Error, &'static str),

    /// The helper binary was not found on `PATH`.
    #[error("dialog helper `{0}` is not installed or not on PATH")]
    HelperMissing(&'static str),

    /// An I/O error while feeding the helper its input or collecting its
    /// output.
    #[error("I/O error talking to `{1}`: {0}")]
    Io(#[source] std::io::Error, &'static str),

    /// The helper exited with a status that is neither success nor the
    /// documented cancellation code.
    #[error("`{tool}` failed ({status}): {stderr}")]
    HelperFailed {
        tool: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The helper produced output that is not valid UTF-8.
    #[error("dialog output was not valid UTF-8")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    /// A Win32 API call returned a failure code.
    #[cfg(target_os = "windows")]
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DialogError>;
