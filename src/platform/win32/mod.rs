//! The Win32 adapter.
//!
//! File and folder dialogs go through the common-dialog and shell APIs;
//! text entry is a hand-built modal window with its own message loop (see
//! [`entry`]). All `unsafe` in the crate is confined to this module and
//! every unsafe block carries a `SAFETY:` comment.

#![allow(unsafe_code)]

mod dpi;
mod entry;
mod file;

pub(crate) use entry::{entry, password};
pub(crate) use file::{pick_file, pick_files, pick_folder, save_file};

use windows::Win32::Foundation::{GetLastError, HWND};

use crate::error::DialogError;

/// Encodes a string as null-terminated UTF-16.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decodes a null-terminated UTF-16 buffer.
fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// The owner window handle requested by the caller, or null.
fn owner_hwnd(owner: Option<isize>) -> HWND {
    match owner {
        Some(raw) => HWND(raw as *mut core::ffi::c_void),
        None => HWND::default(),
    }
}

/// Wraps an error returned by a `windows` crate call, keeping the name of
/// the function that failed for display purposes.
fn win32_error(function: &'static str, e: &windows::core::Error) -> DialogError {
    // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
    DialogError::Win32 {
        function,
        code: e.code().0 as u32,
    }
}

/// Captures the current Win32 last-error code.
///
/// Call immediately after a failing Win32 function; `GetLastError` reads
/// thread-local state that the next API call overwrites.
fn last_error(function: &'static str) -> DialogError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32
    // call. It is always safe to call and never fails.
    let code = unsafe { GetLastError() };
    DialogError::Win32 {
        function,
        code: code.0,
    }
}
