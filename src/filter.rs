//! File-type filters and their per-platform renderings.
//!
//! A [`FileFilter`] is stored as a display name plus bare extensions. Each
//! platform adapter asks for the rendering its native mechanism expects:
//! case-folded glob patterns for zenity, a flat extension list for the
//! macOS `ofType` option, and a double-NUL-terminated pair list for the
//! Win32 `OPENFILENAMEW.lpstrFilter` field. The renderings live here, next
//! to the type, so they stay testable on every platform.

/// A display name plus a set of file extensions, used to populate the
/// filter dropdown of native file dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Label shown in the dialog's filter selector.
    pub name: String,
    /// Bare extensions without dot or glob prefix, e.g. `"png"`.
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Creates a filter, normalizing `"png"`, `".png"`, and `"*.png"` to the
    /// bare extension. Empty entries are discarded.
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        let extensions = extensions
            .iter()
            .map(|e| e.trim_start_matches('*').trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .map(str::to_owned)
            .collect();
        Self {
            name: name.to_owned(),
            extensions,
        }
    }

    /// Extensions as glob patterns (`"png"` → `"*.png"`).
    pub(crate) fn glob_patterns(&self) -> impl Iterator<Item = String> + '_ {
        self.extensions.iter().map(|e| format!("*.{e}"))
    }
}

/// Flattens filters into the extension list the macOS `ofType` option
/// takes. Filter names are not representable there and are dropped.
#[allow(dead_code)] // consumed by the macOS adapter only
pub(crate) fn flat_extensions(filters: &[FileFilter]) -> Vec<String> {
    filters
        .iter()
        .flat_map(|f| f.extensions.iter().cloned())
        .collect()
}

/// Renders one filter as a `--file-filter=Name|*.png *.jpg` argument.
///
/// Glob letters are case-folded (`*.png` → `*.[pP][nN][gG]`) because the
/// file chooser matches patterns case-sensitively.
#[allow(dead_code)] // consumed by the Unix adapter only
pub(crate) fn zenity_filter_arg(filter: &FileFilter) -> Option<String> {
    if filter.extensions.is_empty() {
        return None;
    }
    let mut arg = String::from("--file-filter=");
    if !filter.name.is_empty() {
        arg.push_str(&filter.name);
        arg.push('|');
    }
    for (i, pattern) in filter.glob_patterns().enumerate() {
        if i != 0 {
            arg.push(' ');
        }
        arg.push_str(&fold_case(&pattern));
    }
    Some(arg)
}

/// Rewrites every ASCII letter in a glob pattern as a two-case character
/// class: `*.png` → `*.[pP][nN][gG]`.
#[allow(dead_code)] // consumed by the Unix adapter only
pub(crate) fn fold_case(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 4);
    for c in pattern.chars() {
        if c.is_ascii_alphabetic() {
            out.push('[');
            out.push(c.to_ascii_lowercase());
            out.push(c.to_ascii_uppercase());
            out.push(']');
        } else {
            out.push(c);
        }
    }
    out
}

/// Builds the `lpstrFilter` payload: `Name\0*.png;*.jpg\0…\0\0`.
///
/// Returned as a `String` with embedded NULs; the Win32 adapter encodes it
/// to UTF-16 at the call site. Filters without extensions are skipped, and
/// an empty filter set yields an empty string so the dialog falls back to
/// showing all files.
#[allow(dead_code)] // consumed by the Win32 adapter only
pub(crate) fn win32_filter_spec(filters: &[FileFilter]) -> String {
    let mut spec = String::new();
    for filter in filters {
        if filter.extensions.is_empty() {
            continue;
        }
        let patterns = filter.glob_patterns().collect::<Vec<_>>().join(";");
        if filter.name.is_empty() {
            spec.push_str(&patterns);
        } else {
            spec.push_str(&filter.name);
        }
        spec.push('\0');
        spec.push_str(&patterns);
        spec.push('\0');
    }
    if !spec.is_empty() {
        spec.push('\0');
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_glob_and_dot_prefixes() {
        let f = FileFilter::new("Images", &["png", ".jpg", "*.jpeg", ""]);
        assert_eq!(f.extensions, vec!["png", "jpg", "jpeg"]);
    }

    #[test]
    fn zenity_arg_joins_case_folded_patterns() {
        let f = FileFilter::new("Images", &["png", "jpg"]);
        assert_eq!(
            zenity_filter_arg(&f).unwrap(),
            "--file-filter=Images|*.[pP][nN][gG] *.[jJ][pP][gG]"
        );
    }

    #[test]
    fn zenity_arg_omits_empty_name_and_empty_filter() {
        let unnamed = FileFilter::new("", &["txt"]);
        assert_eq!(
            zenity_filter_arg(&unnamed).unwrap(),
            "--file-filter=*.[tT][xX][tT]"
        );
        assert_eq!(zenity_filter_arg(&FileFilter::new("Empty", &[])), None);
    }

    #[test]
    fn fold_case_leaves_non_letters_alone() {
        assert_eq!(fold_case("*.mp3"), "*.[mM][pP]3");
        assert_eq!(fold_case("*.tar.gz"), "*.[tT][aA][rR].[gG][zZ]");
    }

    #[test]
    fn flat_extensions_drops_names() {
        let filters = vec![
            FileFilter::new("Images", &["png"]),
            FileFilter::new("Docs", &["md", "txt"]),
        ];
        assert_eq!(flat_extensions(&filters), vec!["png", "md", "txt"]);
    }

    #[test]
    fn win32_spec_is_double_nul_terminated() {
        let filters = vec![
            FileFilter::new("Images", &["png", "jpg"]),
            FileFilter::new("", &["txt"]),
        ];
        assert_eq!(
            win32_filter_spec(&filters),
            "Images\0*.png;*.jpg\0*.txt\0*.txt\0\0"
        );
    }

    #[test]
    fn win32_spec_is_empty_without_usable_filters() {
        assert_eq!(win32_filter_spec(&[]), "");
        assert_eq!(win32_filter_spec(&[FileFilter::new("None", &[])]), "");
    }
}
