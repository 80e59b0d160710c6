//! Integration tests for the public dialog surface.
//!
//! Native dialogs cannot be driven from a headless test run, so these
//! tests cover the glue that is reachable without a user: builder state,
//! filter normalization, error rendering, and, on Unix, the
//! helper-discovery failure path, forced by pointing `PATH` at an empty
//! directory.

use askbox::utils::test_helpers::setup_test_logging;
use askbox::{DialogError, EntryDialog, FileDialog, FileFilter};

#[test]
fn filters_normalize_any_extension_spelling() {
    let filter = FileFilter::new("Images", &["png", ".jpeg", "*.gif"]);
    assert_eq!(filter.name, "Images");
    assert_eq!(filter.extensions, vec!["png", "jpeg", "gif"]);
}

#[test]
fn file_dialog_builder_is_cloneable_and_inspectable() {
    let dialog = FileDialog::new()
        .set_title("Export report")
        .set_file_name("report.pdf")
        .add_filter("PDF", &["pdf"])
        .confirm_overwrite(true);

    let copy = dialog.clone();
    let rendered = format!("{copy:?}");
    assert!(rendered.contains("Export report"));
    assert!(rendered.contains("report.pdf"));
    assert!(rendered.contains("pdf"));
}

#[test]
fn entry_dialog_builder_is_inspectable() {
    let dialog = EntryDialog::new("User name:")
        .set_title("Login")
        .set_default("admin")
        .hide_input(false);
    let rendered = format!("{dialog:?}");
    assert!(rendered.contains("User name:"));
    assert!(rendered.contains("admin"));
}

#[test]
fn errors_render_the_failing_tool() {
    let missing = DialogError::HelperMissing("zenity");
    assert_eq!(
        missing.to_string(),
        "dialog helper `zenity` is not installed or not on PATH"
    );

    let spawn = DialogError::Spawn(
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        "osascript",
    );
    assert!(spawn.to_string().contains("osascript"));
}

/// Runs `body` with `PATH` pointing at an empty directory, restoring the
/// original value afterwards. Serialized because the environment is
/// process-global.
#[cfg(all(unix, not(target_os = "macos")))]
fn with_empty_path<T>(body: impl FnOnce() -> T) -> T {
    let tmp = tempfile::tempdir().expect("create empty PATH dir");
    let original = std::env::var_os("PATH");
    std::env::set_var("PATH", tmp.path());
    let result = body();
    match original {
        Some(value) => std::env::set_var("PATH", value),
        None => std::env::remove_var("PATH"),
    }
    result
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
#[serial_test::serial]
fn pick_file_reports_a_missing_helper() {
    setup_test_logging();
    let result = with_empty_path(|| FileDialog::new().set_title("Open").pick_file());
    assert!(matches!(result, Err(DialogError::HelperMissing("zenity"))));
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
#[serial_test::serial]
fn entry_reports_a_missing_helper() {
    setup_test_logging();
    let result = with_empty_path(|| EntryDialog::new("Name:").show());
    assert!(matches!(result, Err(DialogError::HelperMissing("zenity"))));
}
