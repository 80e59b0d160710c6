//! File and folder selection dialogs.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::filter::FileFilter;
use crate::platform;

/// Builder for the native open/save/folder dialogs.
///
/// ```no_run
/// use askbox::FileDialog;
///
/// let path = FileDialog::new()
///     .set_title("Open document")
///     .add_filter("Markdown", &["md", "markdown"])
///     .pick_file()?;
/// # Ok::<(), askbox::DialogError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileDialog {
    pub(crate) title: Option<String>,
    pub(crate) directory: Option<PathBuf>,
    pub(crate) file_name: Option<String>,
    pub(crate) filters: Vec<FileFilter>,
    pub(crate) show_hidden: bool,
    pub(crate) confirm_overwrite: bool,
    pub(crate) owner: Option<isize>,
}

impl FileDialog {
    /// Creates a dialog with no title, no filters, and the platform's
    /// default starting location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dialog window title (the prompt text on macOS).
    pub fn set_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Sets the directory the dialog opens in.
    pub fn set_directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.directory = Some(directory.as_ref().to_path_buf());
        self
    }

    /// Pre-fills the file name field. Only meaningful for [`save_file`].
    ///
    /// [`save_file`]: FileDialog::save_file
    pub fn set_file_name(mut self, file_name: &str) -> Self {
        self.file_name = Some(file_name.to_owned());
        self
    }

    /// Adds a file-type filter. Extensions may be given as `"png"`,
    /// `".png"`, or `"*.png"`.
    pub fn add_filter(mut self, name: &str, extensions: &[&str]) -> Self {
        self.filters.push(FileFilter::new(name, extensions));
        self
    }

    /// Whether hidden files are listed. Not every mechanism honors this;
    /// zenity has no switch for it.
    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    /// Whether [`save_file`] asks before overwriting an existing file.
    /// macOS always asks natively.
    ///
    /// [`save_file`]: FileDialog::save_file
    pub fn confirm_overwrite(mut self, confirm: bool) -> Self {
        self.confirm_overwrite = confirm;
        self
    }

    /// Attaches the dialog to a parent window: an `HWND` on Windows, an X11
    /// window id on Unix. Ignored on macOS, where the dialog attaches to
    /// the frontmost application instead.
    pub fn set_owner(mut self, raw: isize) -> Self {
        self.owner = Some(raw);
        self
    }

    /// Shows an open-file dialog and blocks until it is dismissed.
    pub fn pick_file(self) -> Result<Option<PathBuf>> {
        platform::imp::pick_file(&self)
    }

    /// Shows a multi-select open dialog. `Ok(Some(_))` always holds at
    /// least one path.
    pub fn pick_files(self) -> Result<Option<Vec<PathBuf>>> {
        Ok(platform::imp::pick_files(&self)?.filter(|paths| !paths.is_empty()))
    }

    /// Shows a folder-selection dialog.
    pub fn pick_folder(self) -> Result<Option<PathBuf>> {
        platform::imp::pick_folder(&self)
    }

    /// Shows a save-file dialog. The chosen path is returned exactly as
    /// the native mechanism reports it; no extension is appended.
    pub fn save_file(self) -> Result<Option<PathBuf>> {
        platform::imp::save_file(&self)
    }

    /// The default path composed from directory and file name, in the
    /// shape the zenity `--filename` flag expects: a bare directory gets a
    /// trailing separator so the chooser starts *inside* it.
    #[allow(dead_code)] // consumed by the Unix adapter only
    pub(crate) fn default_path_arg(&self) -> Option<String> {
        match (&self.directory, &self.file_name) {
            (Some(dir), Some(name)) => Some(dir.join(name).to_string_lossy().into_owned()),
            (Some(dir), None) => {
                let mut arg = dir.to_string_lossy().into_owned();
                if !arg.ends_with(std::path::MAIN_SEPARATOR) {
                    arg.push(std::path::MAIN_SEPARATOR);
                }
                Some(arg)
            }
            (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_filters() {
        let dialog = FileDialog::new()
            .add_filter("Images", &["png"])
            .add_filter("All", &["*"]);
        assert_eq!(dialog.filters.len(), 2);
        assert_eq!(dialog.filters[0].name, "Images");
    }

    #[test]
    fn default_path_arg_joins_directory_and_name() {
        let dialog = FileDialog::new()
            .set_directory("/tmp/docs")
            .set_file_name("draft.txt");
        let expected = Path::new("/tmp/docs").join("draft.txt");
        assert_eq!(
            dialog.default_path_arg().unwrap(),
            expected.to_string_lossy()
        );
    }

    #[test]
    fn default_path_arg_marks_bare_directories() {
        let dialog = FileDialog::new().set_directory("/tmp/docs");
        let arg = dialog.default_path_arg().unwrap();
        assert!(arg.ends_with(std::path::MAIN_SEPARATOR));
    }

    #[test]
    fn default_path_arg_is_absent_without_inputs() {
        assert_eq!(FileDialog::new().default_path_arg(), None);
    }
}
