//! Platform-specific dialog adapters.
//!
//! Keep OS quirks here to avoid leaking them into the public builders.
//! Exactly one adapter is compiled in and re-exported as `imp`; each one
//! provides the same six functions (`pick_file`, `pick_files`,
//! `pick_folder`, `save_file`, `entry`, `password`).

#[cfg(target_os = "macos")]
pub(crate) mod macos;
#[cfg(all(unix, not(target_os = "macos")))]
pub(crate) mod unix;
#[cfg(target_os = "windows")]
pub(crate) mod win32;

#[cfg(target_os = "macos")]
pub(crate) use macos as imp;
#[cfg(all(unix, not(target_os = "macos")))]
pub(crate) use unix as imp;
#[cfg(target_os = "windows")]
pub(crate) use win32 as imp;

#[cfg(not(any(unix, target_os = "windows")))]
compile_error!("askbox supports Windows, macOS, and Unix-like targets only");

// Output parsing is shared by the two subprocess adapters.
#[cfg(unix)]
pub(crate) mod output;
