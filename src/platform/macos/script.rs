//! JavaScript-for-Automation script generation.
//!
//! Each dialog becomes a short JXA program fed to `osascript`. Every value
//! that originates from the caller (titles, paths, extension lists) is
//! embedded through JSON encoding, so no string can break out of the
//! generated source. A JSON object is a valid JXA expression, which lets
//! the whole options record go in as one literal.

use serde::Serialize;

/// Options record for the `chooseFile`/`chooseFolder`/`chooseFileName`
/// standard additions. Serialized field names match the JXA parameter
/// names; unset fields are omitted from the literal.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChooseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_prompt: Option<String>,
    pub multiple_selections_allowed: bool,
    pub invisibles: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub of_type: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_name: Option<String>,
}

/// Options record for `displayDialog`, used for text and password entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DialogOptions {
    pub default_answer: String,
    pub hidden_answer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_title: Option<String>,
    pub buttons: Vec<String>,
    pub default_button: String,
    pub cancel_button: String,
}

impl DialogOptions {
    pub(crate) fn new(title: Option<&str>, default_answer: &str, hidden: bool) -> Self {
        Self {
            default_answer: default_answer.to_owned(),
            hidden_answer: hidden,
            with_title: title.map(str::to_owned),
            buttons: vec!["Cancel".to_owned(), "OK".to_owned()],
            default_button: "OK".to_owned(),
            cancel_button: "Cancel".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ChooseOperation {
    File,
    Folder,
    FileName,
}

impl ChooseOperation {
    fn method(self) -> &'static str {
        match self {
            Self::File => "chooseFile",
            Self::Folder => "chooseFolder",
            Self::FileName => "chooseFileName",
        }
    }
}

/// Renders the file/folder script. When `application` is given the script
/// targets that app (and brings it to the front) so the dialog attaches to
/// its windows; otherwise it runs in the script host itself.
pub(crate) fn choose_script(
    application: Option<&str>,
    operation: ChooseOperation,
    options: &ChooseOptions,
) -> String {
    let mut script = header(application);
    script.push_str(&format!(
        "var ret = app.{}({});\n",
        operation.method(),
        to_json(options)
    ));
    // Arrays come back NUL-joined; scalars stringified. The last evaluated
    // expression is what osascript prints.
    script.push_str("if (Array.isArray(ret)) {\n");
    script.push_str("  ret.map(String).join('\\0');\n");
    script.push_str("} else {\n");
    script.push_str("  ret.toString();\n");
    script.push_str("}\n");
    script
}

/// Renders the entry/password script. `textReturned` carries the answer;
/// pressing Cancel aborts the script with AppleEvent error -128.
pub(crate) fn display_dialog_script(text: &str, options: &DialogOptions) -> String {
    let mut script = header(None);
    script.push_str(&format!(
        "var ret = app.displayDialog({}, {});\n",
        js_string(text),
        to_json(options)
    ));
    script.push_str("ret.textReturned;\n");
    script
}

fn header(application: Option<&str>) -> String {
    let mut script = String::new();
    match application {
        Some(name) => {
            script.push_str(&format!("var app = Application({});\n", js_string(name)));
            script.push_str("app.includeStandardAdditions = true;\n");
            script.push_str("app.activate();\n");
        }
        None => {
            script.push_str("var app = Application.currentApplication();\n");
            script.push_str("app.includeStandardAdditions = true;\n");
        }
    }
    script
}

fn js_string(s: &str) -> String {
    to_json(&s)
}

fn to_json<T: Serialize>(value: &T) -> String {
    // String and struct-literal serialization cannot fail.
    serde_json::to_string(value).expect("dialog options serialize to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_script_embeds_options_as_json() {
        let options = ChooseOptions {
            with_prompt: Some("Open".to_owned()),
            of_type: vec!["png".to_owned()],
            ..ChooseOptions::default()
        };
        let script = choose_script(None, ChooseOperation::File, &options);
        assert!(script.contains("var app = Application.currentApplication();"));
        assert!(script.contains(
            r#"app.chooseFile({"withPrompt":"Open","multipleSelectionsAllowed":false,"invisibles":false,"ofType":["png"]})"#
        ));
        assert!(script.contains(r"join('\0')"));
    }

    #[test]
    fn choose_script_targets_frontmost_application() {
        let script = choose_script(None, ChooseOperation::Folder, &ChooseOptions::default());
        assert!(script.contains("chooseFolder"));

        let attached = choose_script(
            Some("Finder"),
            ChooseOperation::Folder,
            &ChooseOptions::default(),
        );
        assert!(attached.contains(r#"var app = Application("Finder");"#));
        assert!(attached.contains("app.activate();"));
    }

    #[test]
    fn caller_strings_cannot_escape_the_script() {
        let options = ChooseOptions {
            with_prompt: Some("\"); doShellScript(\"rm\"".to_owned()),
            ..ChooseOptions::default()
        };
        let script = choose_script(None, ChooseOperation::File, &options);
        assert!(script.contains(r#"\"); doShellScript(\"rm\""#));
    }

    #[test]
    fn display_dialog_script_returns_text() {
        let options = DialogOptions::new(Some("Login"), "", true);
        let script = display_dialog_script("Password:", &options);
        assert!(script.contains(r#"app.displayDialog("Password:", "#));
        assert!(script.contains(r#""hiddenAnswer":true"#));
        assert!(script.contains(r#""withTitle":"Login""#));
        assert!(script.ends_with("ret.textReturned;\n"));
    }
}
