//! Parsing helpers for helper-process output, shared by the subprocess
//! adapters.

use std::path::PathBuf;

/// Strips at most one trailing newline (LF or CRLF) from helper stdout.
/// The payload itself may legitimately be empty.
pub(crate) fn trim_result(mut out: String) -> String {
    if out.ends_with('\n') {
        out.pop();
        if out.ends_with('\r') {
            out.pop();
        }
    }
    out
}

/// Splits a separator-delimited path list, dropping empty segments so a
/// stray trailing separator never yields a phantom path.
pub(crate) fn split_paths(out: &str, separator: char) -> Vec<PathBuf> {
    out.split(separator)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_result_strips_one_newline_only() {
        assert_eq!(trim_result("/a/b\n".into()), "/a/b");
        assert_eq!(trim_result("/a/b\r\n".into()), "/a/b");
        assert_eq!(trim_result("/a/b\n\n".into()), "/a/b\n");
        assert_eq!(trim_result(String::new()), "");
    }

    #[test]
    fn split_paths_drops_empty_segments() {
        let paths = split_paths("/a\u{1e}/b\u{1e}", '\u{1e}');
        assert_eq!(paths, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert!(split_paths("", '\u{1e}').is_empty());
    }
}
