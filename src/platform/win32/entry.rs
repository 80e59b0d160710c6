//! Hand-built modal text-entry window.
//!
//! Win32 has no common dialog for a one-line prompt, so this module builds
//! one: register a window class, create the prompt, edit field, and OK and
//! Cancel buttons, then run a private message loop on the calling thread
//! until the window is destroyed. `IsDialogMessageW` gives the window
//! stock dialog keyboard handling (Tab order, Enter confirms, Esc
//! cancels). `WM_DPICHANGED` re-lays everything out at the new DPI.
//!
//! The class name is a process-wide singleton, so two entry dialogs must
//! not run concurrently; the public types document this.

use std::cell::RefCell;

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{CreateFontIndirectW, DeleteObject, HBRUSH, HFONT, HGDIOBJ},
        System::LibraryLoader::GetModuleHandleW,
        UI::Input::KeyboardAndMouse::SetFocus,
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
            GetSystemMetrics, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
            IsDialogMessageW, PeekMessageW, PostQuitMessage, RegisterClassExW, SendMessageW,
            SetWindowPos, ShowWindow, SystemParametersInfoW, TranslateMessage, UnregisterClassW,
            COLOR_WINDOW, CW_USEDEFAULT, HMENU, MSG, NONCLIENTMETRICSW, PM_REMOVE,
            SM_CXSCREEN, SM_CYSCREEN, SPI_GETNONCLIENTMETRICS, SWP_NOMOVE, SWP_NOSIZE,
            SWP_NOZORDER, SW_SHOWNORMAL, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, WINDOW_EX_STYLE,
            WINDOW_STYLE, WM_CLOSE, WM_COMMAND, WM_DESTROY, WM_DPICHANGED, WM_QUIT, WM_SETFONT,
            WNDCLASSEXW,
        },
    },
};

use super::{dpi, last_error, wide, win32_error};
use crate::dialog::{EntryDialog, PasswordDialog};
use crate::error::Result;

const CLASS_NAME: PCWSTR = w!("AskboxEntryDialog");

// Control ids delivered in the low word of WM_COMMAND's WPARAM.
const ID_OK: usize = 1; // IDOK
const ID_CANCEL: usize = 2; // IDCANCEL

pub(crate) fn entry(dialog: &EntryDialog) -> Result<Option<String>> {
    edit_box(
        dialog.title.as_deref().unwrap_or(""),
        &dialog.text,
        &dialog.default,
        dialog.hidden,
    )
}

pub(crate) fn password(dialog: &PasswordDialog) -> Result<Option<String>> {
    edit_box(dialog.title.as_deref().unwrap_or(""), "Password:", "", true)
}

// ── Per-call state ───────────────────────────────────────────────────────

/// Handles of the live dialog. Copied out of the thread-local before any
/// re-entrant API call so the RefCell is never borrowed across one.
#[derive(Clone, Copy)]
struct Controls {
    wnd: HWND,
    label: HWND,
    edit: HWND,
    ok: HWND,
    cancel: HWND,
    font: HFONT,
}

#[derive(Default)]
struct EntryState {
    controls: Option<Controls>,
    accepted: bool,
    text: Option<String>,
}

thread_local! {
    static STATE: RefCell<EntryState> = RefCell::new(EntryState::default());
}

// ── Dialog construction ──────────────────────────────────────────────────

fn edit_box(title: &str, text: &str, default: &str, hidden: bool) -> Result<Option<String>> {
    // SAFETY: GetModuleHandleW(None) returns the process's own module
    // handle, which stays valid for the process lifetime.
    let hmodule =
        unsafe { GetModuleHandleW(None) }.map_err(|e| win32_error("GetModuleHandleW", &e))?;
    let instance = HINSTANCE(hmodule.0);

    register_class(instance)?;
    let _class = ClassGuard { instance };

    let dpi = dpi::get_system_dpi();
    let s = |px| dpi::scale(px, dpi);

    let wnd = create_control(
        0x0001_0101, // WS_EX_CONTROLPARENT | WS_EX_WINDOWEDGE | WS_EX_DLGMODALFRAME
        CLASS_NAME,
        title,
        0x84C8_0000, // WS_POPUPWINDOW | WS_CLIPSIBLINGS | WS_DLGFRAME
        CW_USEDEFAULT,
        CW_USEDEFAULT,
        s(281),
        s(140),
        None,
        None,
        instance,
    )?;

    let controls = match build_children(wnd, text, default, hidden, dpi, instance) {
        Ok(controls) => controls,
        Err(e) => {
            // SAFETY: wnd was just created on this thread; destroying it
            // also destroys any children that did get created.
            unsafe { let _ = DestroyWindow(wnd); }
            drain_quit_message();
            return Err(e);
        }
    };
    let _font = FontGuard(controls.font);

    STATE.with(|state| {
        *state.borrow_mut() = EntryState {
            controls: Some(controls),
            accepted: false,
            text: None,
        }
    });

    layout(&controls, dpi::get_for_window(wnd));
    center_window(wnd);
    // SAFETY: edit is a live child of wnd; focusing it lets typing start
    // immediately. ShowWindow's previous-visibility return is unused.
    unsafe {
        let _ = SetFocus(controls.edit);
        let _ = ShowWindow(wnd, SW_SHOWNORMAL);
    }

    let loop_result = message_loop(wnd);
    let state = STATE.with(|state| state.replace(EntryState::default()));
    loop_result?;

    Ok(state.accepted.then(|| state.text.unwrap_or_default()))
}

fn build_children(
    wnd: HWND,
    text: &str,
    default: &str,
    hidden: bool,
    dpi: u32,
    instance: HINSTANCE,
) -> Result<Controls> {
    let s = |px| dpi::scale(px, dpi);

    let label = create_control(
        0,
        w!("STATIC"),
        text,
        0x5002_E080, // WS_CHILD | WS_VISIBLE | WS_GROUP | SS_WORDELLIPSIS | SS_EDITCONTROL | SS_NOPREFIX
        s(12),
        s(10),
        s(241),
        s(16),
        Some(wnd),
        None,
        instance,
    )?;

    let mut edit_style: u32 = 0x5003_0080; // WS_CHILD | WS_VISIBLE | WS_GROUP | WS_TABSTOP | ES_AUTOHSCROLL
    if hidden {
        edit_style |= 0x20; // ES_PASSWORD
    }
    let edit = create_control(
        0x200, // WS_EX_CLIENTEDGE
        w!("EDIT"),
        default,
        edit_style,
        s(12),
        s(30),
        s(241),
        s(24),
        Some(wnd),
        None,
        instance,
    )?;

    let ok = create_control(
        0,
        w!("BUTTON"),
        "OK",
        0x5003_0001, // WS_CHILD | WS_VISIBLE | WS_GROUP | WS_TABSTOP | BS_DEFPUSHBUTTON
        s(12),
        s(65),
        s(75),
        s(24),
        Some(wnd),
        Some(ID_OK),
        instance,
    )?;
    let cancel = create_control(
        0,
        w!("BUTTON"),
        "Cancel",
        0x5001_0000, // WS_CHILD | WS_VISIBLE | WS_GROUP | WS_TABSTOP
        s(95),
        s(65),
        s(75),
        s(24),
        Some(wnd),
        Some(ID_CANCEL),
        instance,
    )?;

    Ok(Controls {
        wnd,
        label,
        edit,
        ok,
        cancel,
        font: message_font(),
    })
}

fn create_control(
    ex_style: u32,
    class: PCWSTR,
    text: &str,
    style: u32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    parent: Option<HWND>,
    id: Option<usize>,
    instance: HINSTANCE,
) -> Result<HWND> {
    let text_w = wide(text);
    // SAFETY: class and text_w are valid null-terminated UTF-16 strings
    // that outlive the call; parent, when given, is a live window on this
    // thread. The control id travels in the HMENU parameter for child
    // windows.
    unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(ex_style),
            class,
            PCWSTR(text_w.as_ptr()),
            WINDOW_STYLE(style),
            x,
            y,
            width,
            height,
            parent,
            id.map(|id| HMENU(id as *mut core::ffi::c_void)),
            instance,
            None,
        )
    }
    .map_err(|e| win32_error("CreateWindowExW", &e))
}

fn register_class(instance: HINSTANCE) -> Result<()> {
    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        lpfnWndProc: Some(wnd_proc),
        hInstance: instance,
        // COLOR_WINDOW + 1 is the standard class-background encoding.
        hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as usize as *mut core::ffi::c_void),
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };

    // SAFETY: wc is fully initialised and CLASS_NAME is a static UTF-16
    // literal.
    let atom = unsafe { RegisterClassExW(&wc) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }
    Ok(())
}

/// Unregisters the window class when the call unwinds, error paths
/// included. Must drop after the window itself is destroyed.
struct ClassGuard {
    instance: HINSTANCE,
}

impl Drop for ClassGuard {
    fn drop(&mut self) {
        // SAFETY: the class was registered with this instance; failure here
        // (class still in use) only delays cleanup to process exit.
        unsafe {
            let _ = UnregisterClassW(CLASS_NAME, self.instance);
        }
    }
}

struct FontGuard(HFONT);

impl Drop for FontGuard {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            // SAFETY: the font was created by CreateFontIndirectW and no
            // control uses it once the dialog window is gone.
            unsafe {
                let _ = DeleteObject(HGDIOBJ(self.0 .0));
            }
        }
    }
}

// ── Layout ───────────────────────────────────────────────────────────────

fn layout(controls: &Controls, dpi: u32) {
    let s = |px| dpi::scale(px, dpi);
    // SAFETY: every handle belongs to the live dialog; SetWindowPos and
    // WM_SETFONT are ordinary UI-thread operations on them.
    unsafe {
        let _ = SetWindowPos(controls.wnd, None, 0, 0, s(281), s(140), SWP_NOZORDER | SWP_NOMOVE);
        let _ = SetWindowPos(controls.label, None, s(12), s(10), s(241), s(16), SWP_NOZORDER);
        let _ = SetWindowPos(controls.edit, None, s(12), s(30), s(241), s(24), SWP_NOZORDER);
        let _ = SetWindowPos(controls.ok, None, s(12), s(65), s(75), s(24), SWP_NOZORDER);
        let _ = SetWindowPos(controls.cancel, None, s(95), s(65), s(75), s(24), SWP_NOZORDER);

        for ctl in [controls.label, controls.edit, controls.ok, controls.cancel] {
            SendMessageW(ctl, WM_SETFONT, WPARAM(controls.font.0 as usize), LPARAM(1));
        }
    }
}

fn center_window(wnd: HWND) {
    let mut rect = RECT::default();
    // SAFETY: wnd is live and rect is writable; SM_CXSCREEN/SM_CYSCREEN
    // are always valid metrics.
    unsafe {
        if GetWindowRect(wnd, &mut rect).is_ok() {
            let x = (GetSystemMetrics(SM_CXSCREEN) - (rect.right - rect.left)) / 2;
            let y = (GetSystemMetrics(SM_CYSCREEN) - (rect.bottom - rect.top)) / 2;
            let _ = SetWindowPos(wnd, None, x, y, 0, 0, SWP_NOZORDER | SWP_NOSIZE);
        }
    }
}

/// The font Windows uses for dialog text, from the non-client metrics.
/// A null font is tolerated everywhere downstream.
fn message_font() -> HFONT {
    let mut metrics = NONCLIENTMETRICSW {
        cbSize: std::mem::size_of::<NONCLIENTMETRICSW>() as u32,
        ..Default::default()
    };
    // SAFETY: metrics is writable, cbSize is set, and the action fills the
    // struct without retaining the pointer.
    let filled = unsafe {
        SystemParametersInfoW(
            SPI_GETNONCLIENTMETRICS,
            metrics.cbSize,
            Some(&mut metrics as *mut _ as *mut core::ffi::c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };
    if filled.is_err() {
        return HFONT::default();
    }
    // SAFETY: lfMessageFont was just filled in by the system.
    unsafe { CreateFontIndirectW(&metrics.lfMessageFont) }
}

// ── Message loop ─────────────────────────────────────────────────────────

fn message_loop(wnd: HWND) -> Result<()> {
    let mut msg = MSG::default();
    loop {
        // SAFETY: &mut msg is a valid MSG pointer; None retrieves messages
        // for every window on this thread.
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        match ret.0 {
            // GetMessageW returns -1 on error.
            -1 => return Err(last_error("GetMessageW")),
            // Returns 0 when WM_QUIT is retrieved.
            0 => return Ok(()),
            _ => {
                // SAFETY: msg was populated by a successful GetMessageW;
                // IsDialogMessageW gives the window dialog keyboard
                // handling and dispatches the message itself when it
                // returns TRUE.
                unsafe {
                    if !IsDialogMessageW(wnd, &msg).as_bool() {
                        let _ = TranslateMessage(&msg);
                        DispatchMessageW(&msg);
                    }
                }
            }
        }
    }
}

/// Removes a pending WM_QUIT so an aborted construction does not poison
/// the next dialog's message loop on this thread.
fn drain_quit_message() {
    let mut msg = MSG::default();
    // SAFETY: &mut msg is valid; PM_REMOVE pops the message if present.
    unsafe {
        let _ = PeekMessageW(&mut msg, None, WM_QUIT, WM_QUIT, PM_REMOVE);
    }
}

// ── Window procedure ─────────────────────────────────────────────────────

// SAFETY: registered as lpfnWndProc; Windows guarantees the parameters are
// valid for the duration of each call. The thread-local is never borrowed
// across a re-entrant API call.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CLOSE => {
            // SAFETY: hwnd is the dialog being closed; DestroyWindow
            // triggers WM_DESTROY, which posts WM_QUIT.
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }

        WM_DESTROY => {
            // SAFETY: always valid from WM_DESTROY; ends the private loop.
            PostQuitMessage(0);
            LRESULT(0)
        }

        WM_COMMAND => match wparam.0 & 0xFFFF {
            ID_OK => {
                capture_entry_text();
                // SAFETY: same as WM_CLOSE handler.
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            }
            ID_CANCEL => {
                // SAFETY: same as WM_CLOSE handler.
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        },

        WM_DPICHANGED => {
            // High word of WPARAM is the new Y-axis DPI.
            let new_dpi = ((wparam.0 >> 16) & 0xFFFF) as u32;
            let controls = STATE.with(|state| state.borrow().controls);
            if let Some(controls) = controls {
                layout(&controls, new_dpi);
            }
            LRESULT(0)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Reads the edit control's text into the per-call state and marks the
/// dialog accepted.
fn capture_entry_text() {
    let edit = STATE.with(|state| state.borrow().controls.map(|c| c.edit));
    let Some(edit) = edit else { return };
    let text = window_text(edit);
    STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.text = Some(text);
        state.accepted = true;
    });
}

fn window_text(hwnd: HWND) -> String {
    // SAFETY: hwnd is a live edit control on this thread; the buffer is
    // sized from GetWindowTextLengthW plus the null terminator.
    unsafe {
        let len = GetWindowTextLengthW(hwnd).max(0) as usize;
        let mut buf = vec![0u16; len + 1];
        let copied = GetWindowTextW(hwnd, &mut buf).max(0) as usize;
        String::from_utf16_lossy(&buf[..copied])
    }
}
