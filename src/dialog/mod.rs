//! The public builder types.
//!
//! Every operation blocks the calling thread until the user dismisses the
//! native dialog, then returns `Ok(Some(_))` on confirmation, `Ok(None)` on
//! cancellation, and `Err(_)` only when the native mechanism itself failed.

pub mod entry;
pub mod file;

pub use entry::{EntryDialog, PasswordDialog};
pub use file::FileDialog;
