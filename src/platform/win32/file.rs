//! File and folder dialogs via the common-dialog and shell APIs.
//!
//! `GetOpenFileNameW`/`GetSaveFileNameW` return FALSE for both cancel and
//! failure; `CommDlgExtendedError` disambiguates (zero means the user
//! dismissed the dialog).

use std::path::PathBuf;

use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        System::Com::{CoInitializeEx, CoTaskMemFree, CoUninitialize, COINIT_APARTMENTTHREADED},
        UI::Controls::Dialogs::{
            CommDlgExtendedError, GetOpenFileNameW, GetSaveFileNameW, OPENFILENAMEW,
            OFN_ALLOWMULTISELECT, OFN_EXPLORER, OFN_FILEMUSTEXIST, OFN_FORCESHOWHIDDEN,
            OFN_HIDEREADONLY, OFN_OVERWRITEPROMPT, OFN_PATHMUSTEXIST,
        },
        UI::Shell::{SHBrowseForFolderW, SHGetPathFromIDListW, BROWSEINFOW},
    },
};

use super::{from_wide, owner_hwnd, wide};
use crate::dialog::FileDialog;
use crate::error::{DialogError, Result};
use crate::filter::win32_filter_spec;

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; 32 768 is the
/// documented maximum for `\\?\` extended paths.
const PATH_BUF_LEN: usize = 32_768;

/// Multi-select results share one buffer, so give it more headroom.
const MULTI_BUF_LEN: usize = 4 * PATH_BUF_LEN;

pub(crate) fn pick_file(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    let mut buf = vec![0u16; PATH_BUF_LEN];
    let ctx = OfnContext::new(dialog);

    let mut ofn = ctx.base_ofn(&mut buf);
    ofn.Flags |= OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY;

    // SAFETY: ofn is fully initialised; buf and the strings held by ctx
    // outlive this call. GetOpenFileNameW reads and writes only within the
    // buffers we provided, on the calling thread.
    let ok = unsafe { GetOpenFileNameW(&mut ofn) };
    confirmed(ok.as_bool(), "GetOpenFileNameW")
        .map(|c| c.then(|| PathBuf::from(from_wide(&buf))))
}

pub(crate) fn pick_files(dialog: &FileDialog) -> Result<Option<Vec<PathBuf>>> {
    let mut buf = vec![0u16; MULTI_BUF_LEN];
    let ctx = OfnContext::new(dialog);

    let mut ofn = ctx.base_ofn(&mut buf);
    ofn.Flags |= OFN_FILEMUSTEXIST
        | OFN_PATHMUSTEXIST
        | OFN_HIDEREADONLY
        | OFN_ALLOWMULTISELECT
        | OFN_EXPLORER;

    // SAFETY: same invariants as pick_file above.
    let ok = unsafe { GetOpenFileNameW(&mut ofn) };
    confirmed(ok.as_bool(), "GetOpenFileNameW").map(|c| c.then(|| parse_multi(&buf)))
}

pub(crate) fn save_file(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    // Pre-fill the buffer with the suggested file name.
    let mut buf: Vec<u16> = dialog
        .file_name
        .as_deref()
        .unwrap_or("")
        .encode_utf16()
        .chain(std::iter::repeat(0))
        .take(PATH_BUF_LEN)
        .collect();
    let ctx = OfnContext::new(dialog);

    let mut ofn = ctx.base_ofn(&mut buf);
    ofn.Flags |= OFN_PATHMUSTEXIST;
    if dialog.confirm_overwrite {
        ofn.Flags |= OFN_OVERWRITEPROMPT;
    }

    // SAFETY: same invariants as pick_file above.
    let ok = unsafe { GetSaveFileNameW(&mut ofn) };
    confirmed(ok.as_bool(), "GetSaveFileNameW")
        .map(|c| c.then(|| PathBuf::from(from_wide(&buf))))
}

pub(crate) fn pick_folder(dialog: &FileDialog) -> Result<Option<PathBuf>> {
    let title = dialog.title.as_deref().map(wide);
    // The shell browser caps results at MAX_PATH, unlike the common dialogs.
    let mut display = [0u16; 260];

    // SAFETY: the shell folder browser requires COM on this thread. S_FALSE
    // (already initialised) still pairs with CoUninitialize; a hard failure
    // skips the uninit but the browser can still run on an MTA thread.
    let com = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };

    let bi = BROWSEINFOW {
        hwndOwner: owner_hwnd(dialog.owner),
        pszDisplayName: PWSTR(display.as_mut_ptr()),
        lpszTitle: title
            .as_ref()
            .map_or(PCWSTR::null(), |t| PCWSTR(t.as_ptr())),
        // BIF_RETURNONLYFSDIRS | BIF_NEWDIALOGSTYLE
        ulFlags: 0x0000_0041,
        ..Default::default()
    };

    // SAFETY: bi is fully initialised and display outlives the call. The
    // returned PIDL is owned by us and freed below.
    let pidl = unsafe { SHBrowseForFolderW(&bi) };

    let result = if pidl.is_null() {
        // The browser gives no error channel; a null PIDL is a cancel.
        Ok(None)
    } else {
        let mut buf = [0u16; 260];
        // SAFETY: pidl is the non-null list returned above; buf is writable
        // for the MAX_PATH WCHARs the API requires.
        let ok = unsafe { SHGetPathFromIDListW(pidl, &mut buf) };
        // SAFETY: pidl was allocated by the shell and must be freed exactly
        // once with CoTaskMemFree.
        unsafe { CoTaskMemFree(Some(pidl.cast())) };
        if ok.as_bool() {
            Ok(Some(PathBuf::from(from_wide(&buf))))
        } else {
            Err(DialogError::Win32 {
                function: "SHGetPathFromIDListW",
                code: 0,
            })
        }
    };

    if com.is_ok() {
        // SAFETY: pairs with the successful CoInitializeEx above.
        unsafe { CoUninitialize() };
    }
    result
}

/// Owned UTF-16 strings referenced by an `OPENFILENAMEW`. Keeping them in
/// one struct ties their lifetime to the dialog call.
struct OfnContext {
    title: Option<Vec<u16>>,
    initial_dir: Option<Vec<u16>>,
    filter: Option<Vec<u16>>,
    owner: Option<isize>,
    show_hidden: bool,
}

impl OfnContext {
    fn new(dialog: &FileDialog) -> Self {
        let spec = win32_filter_spec(&dialog.filters);
        Self {
            title: dialog.title.as_deref().map(wide),
            initial_dir: dialog
                .directory
                .as_ref()
                .map(|d| wide(&d.to_string_lossy())),
            filter: (!spec.is_empty()).then(|| spec.encode_utf16().collect()),
            owner: dialog.owner,
            show_hidden: dialog.show_hidden,
        }
    }

    fn base_ofn(&self, buf: &mut [u16]) -> OPENFILENAMEW {
        let mut ofn = OPENFILENAMEW {
            lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
            hwndOwner: owner_hwnd(self.owner),
            lpstrFile: PWSTR(buf.as_mut_ptr()),
            nMaxFile: buf.len() as u32,
            ..Default::default()
        };
        if let Some(title) = &self.title {
            ofn.lpstrTitle = PCWSTR(title.as_ptr());
        }
        if let Some(dir) = &self.initial_dir {
            ofn.lpstrInitialDir = PCWSTR(dir.as_ptr());
        }
        if let Some(filter) = &self.filter {
            ofn.lpstrFilter = PCWSTR(filter.as_ptr());
        }
        if self.show_hidden {
            ofn.Flags |= OFN_FORCESHOWHIDDEN;
        }
        ofn
    }
}

/// Maps the common-dialog FALSE return onto cancel vs. failure.
fn confirmed(ok: bool, function: &'static str) -> Result<bool> {
    if ok {
        return Ok(true);
    }
    // SAFETY: CommDlgExtendedError reads thread-local state left by the
    // common-dialog call that just returned.
    let err = unsafe { CommDlgExtendedError() };
    if err.0 == 0 {
        Ok(false)
    } else {
        Err(DialogError::Win32 {
            function,
            code: err.0,
        })
    }
}

/// Parses the `OFN_EXPLORER` multi-select buffer: a directory followed by
/// file names, each null-terminated, ending with a double null. A single
/// selection leaves one full path instead.
fn parse_multi(buf: &[u16]) -> Vec<PathBuf> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, &c) in buf.iter().enumerate() {
        if c == 0 {
            if i == start {
                break; // double null: end of list
            }
            segments.push(String::from_utf16_lossy(&buf[start..i]));
            start = i + 1;
        }
    }

    match segments.len() {
        0 => Vec::new(),
        1 => vec![PathBuf::from(&segments[0])],
        _ => {
            let dir = PathBuf::from(&segments[0]);
            segments[1..].iter().map(|name| dir.join(name)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(segments: &[&str]) -> Vec<u16> {
        let mut buf = Vec::new();
        for s in segments {
            buf.extend(s.encode_utf16());
            buf.push(0);
        }
        buf.push(0);
        buf
    }

    #[test]
    fn parse_multi_joins_directory_and_names() {
        let buf = encode(&[r"C:\docs", "a.txt", "b.txt"]);
        assert_eq!(
            parse_multi(&buf),
            vec![
                PathBuf::from(r"C:\docs").join("a.txt"),
                PathBuf::from(r"C:\docs").join("b.txt"),
            ]
        );
    }

    #[test]
    fn parse_multi_accepts_a_single_full_path() {
        let buf = encode(&[r"C:\docs\a.txt"]);
        assert_eq!(parse_multi(&buf), vec![PathBuf::from(r"C:\docs\a.txt")]);
    }
}
