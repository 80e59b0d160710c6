//! The zenity adapter for Linux and the BSDs.
//!
//! Every dialog is one `zenity` invocation: options become command-line
//! flags, the chosen paths come back on stdout, and the exit code carries
//! the confirm/cancel distinction (0 confirmed, 1 dismissed).

use std::path::PathBuf;
use std::process::Command;

use crate::dialog::{EntryDialog, FileDialog, PasswordDialog};
use crate::error::{DialogError, Result};
use crate::filter::zenity_filter_arg;
use crate::platform::output::{split_paths, trim_result};

const TOOL: &str = "zenity";

/// Separator for `--multiple` output. ASCII RS cannot appear in a path,
/// unlike zenity's default `|`.
const LIST_SEPARATOR: char = '\u{1e}';

pub(crate) fn pick_file(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    let mut args = vec!["--file-selection".to_owned()];
    push_general_args(&mut args, dialog.title.as_deref(), dialog.owner);
    push_file_args(&mut args, dialog);
    Ok(run(TOOL, &args)?.map(PathBuf::from))
}

pub(crate) fn pick_files(dialog: &FileDialog) -> Result<Option<Vec<PathBuf>>> {
    let mut args = vec![
        "--file-selection".to_owned(),
        "--multiple".to_owned(),
        "--separator".to_owned(),
        LIST_SEPARATOR.to_string(),
    ];
    push_general_args(&mut args, dialog.title.as_deref(), dialog.owner);
    push_file_args(&mut args, dialog);
    Ok(run(TOOL, &args)?.map(|out| split_paths(&out, LIST_SEPARATOR)))
}

pub(crate) fn pick_folder(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    let mut args = vec!["--file-selection".to_owned(), "--directory".to_owned()];
    push_general_args(&mut args, dialog.title.as_deref(), dialog.owner);
    push_file_args(&mut args, dialog);
    Ok(run(TOOL, &args)?.map(PathBuf::from))
}

pub(crate) fn save_file(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    let mut args = vec!["--file-selection".to_owned(), "--save".to_owned()];
    if dialog.confirm_overwrite {
        args.push("--confirm-overwrite".to_owned());
    }
    push_general_args(&mut args, dialog.title.as_deref(), dialog.owner);
    push_file_args(&mut args, dialog);
    Ok(run(TOOL, &args)?.map(PathBuf::from))
}

pub(crate) fn entry(dialog: &EntryDialog) -> Result<Option<String>> {
    let mut args = vec!["--entry".to_owned(), "--text".to_owned(), dialog.text.clone()];
    if !dialog.default.is_empty() {
        args.push("--entry-text".to_owned());
        args.push(dialog.default.clone());
    }
    if dialog.hidden {
        args.push("--hide-text".to_owned());
    }
    push_general_args(&mut args, dialog.title.as_deref(), None);
    run(TOOL, &args)
}

pub(crate) fn password(dialog: &PasswordDialog) -> Result<Option<String>> {
    let mut args = vec!["--password".to_owned()];
    push_general_args(&mut args, dialog.title.as_deref(), None);
    run(TOOL, &args)
}

fn push_general_args(args: &mut Vec<String>, title: Option<&str>, owner: Option<isize>) {
    if let Some(title) = title {
        args.push("--title".to_owned());
        args.push(title.to_owned());
    }
    if let Some(owner) = owner {
        args.push(format!("--attach={owner}"));
    }
}

fn push_file_args(args: &mut Vec<String>, dialog: &FileDialog) {
    if let Some(path) = dialog.default_path_arg() {
        args.push("--filename".to_owned());
        args.push(path);
    }
    args.extend(dialog.filters.iter().filter_map(zenity_filter_arg));
}

/// Runs the helper and maps its exit status: 0 parses stdout, 1 is the
/// documented "dialog dismissed" code, anything else is a failure.
fn run(tool: &'static str, args: &[String]) -> Result<Option<String>> {
    tracing::debug!("launching {} with {:?}", tool, args);
    let output = Command::new(tool).args(args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DialogError::HelperMissing(tool)
        } else {
            DialogError::Spawn(e, tool)
        }
    })?;

    match output.status.code() {
        Some(0) => {
            if !output.stderr.is_empty() {
                tracing::warn!(
                    "{} wrote to stderr on success: {}",
                    tool,
                    String::from_utf8_lossy(&output.stderr).trim_end()
                );
            }
            Ok(Some(trim_result(String::from_utf8(output.stdout)?)))
        }
        Some(1) => Ok(None),
        _ => Err(DialogError::HelperFailed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::setup_test_logging;

    #[test]
    fn save_args_carry_overwrite_and_filename() {
        let dialog = FileDialog::new()
            .set_title("Save as")
            .set_directory("/tmp")
            .set_file_name("out.txt")
            .confirm_overwrite(true);

        let mut args = vec!["--file-selection".to_owned(), "--save".to_owned()];
        if dialog.confirm_overwrite {
            args.push("--confirm-overwrite".to_owned());
        }
        push_general_args(&mut args, dialog.title.as_deref(), dialog.owner);
        push_file_args(&mut args, &dialog);

        assert_eq!(
            args,
            vec![
                "--file-selection",
                "--save",
                "--confirm-overwrite",
                "--title",
                "Save as",
                "--filename",
                "/tmp/out.txt",
            ]
        );
    }

    #[test]
    fn filter_and_attach_args_are_rendered() {
        let dialog = FileDialog::new()
            .add_filter("Images", &["png"])
            .set_owner(0x2e00007);

        let mut args = Vec::new();
        push_general_args(&mut args, dialog.title.as_deref(), dialog.owner);
        push_file_args(&mut args, &dialog);

        assert_eq!(
            args,
            vec![
                format!("--attach={}", 0x2e00007),
                "--file-filter=Images|*.[pP][nN][gG]".to_owned(),
            ]
        );
    }

    #[test]
    fn run_parses_stdout_on_success() {
        setup_test_logging();
        let out = run("sh", &["-c".into(), "printf '/a/b\\n'".into()]).unwrap();
        assert_eq!(out.as_deref(), Some("/a/b"));
    }

    #[test]
    fn run_treats_exit_one_as_cancel() {
        setup_test_logging();
        let out = run("sh", &["-c".into(), "exit 1".into()]).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn run_reports_other_exit_codes_with_stderr() {
        setup_test_logging();
        let err = run("sh", &["-c".into(), "echo broken >&2; exit 5".into()]).unwrap_err();
        match err {
            DialogError::HelperFailed { tool, stderr, .. } => {
                assert_eq!(tool, "sh");
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn run_maps_missing_binary() {
        setup_test_logging();
        let err = run("askbox-no-such-helper", &[]).unwrap_err();
        assert!(matches!(err, DialogError::HelperMissing(_)));
    }
}
