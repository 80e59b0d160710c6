//! Native open/save/folder and text-entry dialogs through one blocking API.
//!
//! Each operating system gets its own adapter: Win32 common dialogs plus a
//! hand-built entry window on Windows, `osascript` automation scripts on
//! macOS, and the `zenity` helper on Linux and the BSDs. The builders in
//! [`dialog`] are the whole public surface; everything platform-specific
//! stays behind them.
//!
//! ```no_run
//! let path = askbox::FileDialog::new()
//!     .set_title("Open document")
//!     .add_filter("Markdown", &["md", "markdown"])
//!     .pick_file()?;
//!
//! if let Some(path) = path {
//!     println!("opening {}", path.display());
//! }
//! # Ok::<(), askbox::DialogError>(())
//! ```
//!
//! Every operation blocks the calling thread until the user dismisses the
//! dialog. `Ok(None)` is a cancel; `Err(_)` means the native mechanism
//! itself failed.

// Unsafe code is forbidden everywhere except `platform::win32`, which is
// raw Win32 FFI. Each unsafe block there carries a `SAFETY:` comment.
#![deny(unsafe_code)]

pub mod dialog;
pub mod error;
pub mod filter;
mod platform;
pub mod utils;

pub use dialog::{EntryDialog, FileDialog, PasswordDialog};
pub use error::{DialogError, Result};
pub use filter::FileFilter;
