//! Small helpers that do not belong to any dialog.

pub mod test_helpers;
