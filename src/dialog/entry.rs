//! Text-entry and password dialogs.

use crate::error::Result;
use crate::platform;

/// Builder for a single-line text-entry dialog.
///
/// On Windows the dialog window uses a fixed class name, so only one entry
/// or password dialog may be open per process at a time.
///
/// ```no_run
/// use askbox::EntryDialog;
///
/// let name = EntryDialog::new("Project name:")
///     .set_title("New project")
///     .set_default("untitled")
///     .show()?;
/// # Ok::<(), askbox::DialogError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntryDialog {
    pub(crate) title: Option<String>,
    pub(crate) text: String,
    pub(crate) default: String,
    pub(crate) hidden: bool,
}

impl EntryDialog {
    /// Creates an entry dialog with the given prompt label.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            ..Self::default()
        }
    }

    /// Sets the dialog window title.
    pub fn set_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Pre-fills the input field.
    pub fn set_default(mut self, default: &str) -> Self {
        self.default = default.to_owned();
        self
    }

    /// Masks the typed characters, as a password field does.
    pub fn hide_input(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Shows the dialog and blocks until it is dismissed. An empty answer
    /// confirmed with OK is `Ok(Some(String::new()))`, not a cancel.
    pub fn show(self) -> Result<Option<String>> {
        platform::imp::entry(&self)
    }
}

/// Builder for a password prompt. Uses the platform's dedicated password
/// dialog where one exists, and a masked entry field elsewhere. The
/// Windows concurrency caveat on [`EntryDialog`] applies here too.
#[derive(Debug, Clone, Default)]
pub struct PasswordDialog {
    pub(crate) title: Option<String>,
}

impl PasswordDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dialog window title.
    pub fn set_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Shows the dialog and blocks until it is dismissed.
    pub fn show(self) -> Result<Option<String>> {
        platform::imp::password(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_builder_keeps_prompt_and_default() {
        let dialog = EntryDialog::new("Name:").set_default("anon").hide_input(true);
        assert_eq!(dialog.text, "Name:");
        assert_eq!(dialog.default, "anon");
        assert!(dialog.hidden);
    }
}
