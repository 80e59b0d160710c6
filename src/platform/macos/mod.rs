//! The osascript adapter for macOS.
//!
//! Dialogs are presented by generating a small JXA program (see
//! [`script`]) and running it through `osascript -l JavaScript`. A
//! confirmed dialog prints the result; a cancelled one aborts the script
//! with AppleEvent error -128, which `osascript` reports as a non-zero
//! exit with the code in stderr.

pub(crate) mod script;

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::dialog::{EntryDialog, FileDialog, PasswordDialog};
use crate::error::{DialogError, Result};
use crate::filter::flat_extensions;
use crate::platform::output::{split_paths, trim_result};

use script::{ChooseOperation, ChooseOptions, DialogOptions};

const TOOL: &str = "osascript";

/// Arrays are NUL-joined inside the script; NUL cannot appear in a path.
const LIST_SEPARATOR: char = '\0';

pub(crate) fn pick_file(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    let options = choose_options(dialog, false)?;
    let source = script::choose_script(
        frontmost_application().as_deref(),
        ChooseOperation::File,
        &options,
    );
    Ok(run_script(&source)?.map(PathBuf::from))
}

pub(crate) fn pick_files(dialog: &FileDialog) -> Result<Option<Vec<PathBuf>>> {
    let mut options = choose_options(dialog, false)?;
    options.multiple_selections_allowed = true;
    let source = script::choose_script(
        frontmost_application().as_deref(),
        ChooseOperation::File,
        &options,
    );
    Ok(run_script(&source)?.map(|out| split_paths(&out, LIST_SEPARATOR)))
}

pub(crate) fn pick_folder(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    let options = choose_options(dialog, false)?;
    let source = script::choose_script(
        frontmost_application().as_deref(),
        ChooseOperation::Folder,
        &options,
    );
    Ok(run_script(&source)?.map(PathBuf::from))
}

pub(crate) fn save_file(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    // chooseFileName prompts about overwriting on its own; the
    // confirm_overwrite option has no extra work to do here.
    let options = choose_options(dialog, true)?;
    let source = script::choose_script(
        frontmost_application().as_deref(),
        ChooseOperation::FileName,
        &options,
    );
    Ok(run_script(&source)?.map(PathBuf::from))
}

pub(crate) fn entry(dialog: &EntryDialog) -> Result<Option<String>> {
    let options = DialogOptions::new(dialog.title.as_deref(), &dialog.default, dialog.hidden);
    run_script(&script::display_dialog_script(&dialog.text, &options))
}

pub(crate) fn password(dialog: &PasswordDialog) -> Result<Option<String>> {
    let options = DialogOptions::new(dialog.title.as_deref(), "", true);
    run_script(&script::display_dialog_script("Password:", &options))
}

/// Maps the builder onto a `ChooseOptions` record. The default location is
/// made absolute first; `chooseFile` silently ignores relative paths.
fn choose_options(dialog: &FileDialog, for_save: bool) -> Result<ChooseOptions> {
    let default_location = dialog
        .directory
        .as_ref()
        .map(std::path::absolute)
        .transpose()
        .map_err(|e| DialogError::Io(e, TOOL))?
        .map(|p| p.to_string_lossy().into_owned());

    let mut options = ChooseOptions {
        with_prompt: dialog.title.clone(),
        invisibles: dialog.show_hidden,
        default_location,
        ..ChooseOptions::default()
    };
    if for_save {
        options.default_name = dialog.file_name.clone();
    } else {
        options.of_type = flat_extensions(&dialog.filters);
    }
    Ok(options)
}

/// Asks System Events for the frontmost application so the dialog can
/// attach to it. Any failure just means no attachment.
fn frontmost_application() -> Option<String> {
    const QUERY: &str = r#"tell application "System Events"
    set frontAppName to name of first application process whose frontmost is true
end tell

return frontAppName"#;

    let output = Command::new(TOOL).args(["-e", QUERY]).output().ok()?;
    if !output.status.success() {
        tracing::debug!("frontmost application query failed, dialog will not attach");
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn run_script(source: &str) -> Result<Option<String>> {
    tracing::debug!("running {} script:\n{}", TOOL, source);
    let mut child = Command::new(TOOL)
        .args(["-l", "JavaScript", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DialogError::HelperMissing(TOOL)
            } else {
                DialogError::Spawn(e, TOOL)
            }
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // An early helper exit closes the pipe; the status check below
        // reports whatever actually went wrong.
        if let Err(e) = stdin.write_all(source.as_bytes()) {
            tracing::debug!("writing script to {} failed: {}", TOOL, e);
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| DialogError::Io(e, TOOL))?;

    if output.status.success() {
        if !output.stderr.is_empty() {
            tracing::warn!(
                "{} wrote to stderr on success: {}",
                TOOL,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        return Ok(Some(trim_result(String::from_utf8(output.stdout)?)));
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_owned();
    // AppleEvent error -128: "User canceled."
    if stderr.contains("-128") {
        Ok(None)
    } else {
        Err(DialogError::HelperFailed {
            tool: TOOL,
            status: output.status,
            stderr,
        })
    }
}
