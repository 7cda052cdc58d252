use crate::lab_error::LabResult;
use eyre::eyre;
use tracing::error;
use widestring::U16CStr;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

/// Per-window state reachable from the window procedure.
pub trait WindowClass {
    /// Returns true when the message was handled and `DefWindowProcW` should
    /// not see it.
    fn handle(&mut self, message: u32, wparam: WPARAM, lparam: LPARAM) -> bool;
}

/// A registered class, identified by its atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassAtom(u16);

impl ClassAtom {
    /// Equivalent of `MAKEINTATOM`: the atom in the low word of a pointer.
    pub fn as_pcwstr(&self) -> PCWSTR {
        PCWSTR(self.0 as usize as *const u16)
    }
}

pub fn create_window_class_struct<W: WindowClass>(
    instance: HMODULE,
    class_name: &U16CStr,
) -> LabResult<WNDCLASSEXW> {
    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc::<W>),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW)? },
        lpszClassName: PCWSTR(class_name.as_ptr()),
        ..Default::default()
    };
    Ok(wc)
}

pub fn register_window_class(class: &WNDCLASSEXW) -> LabResult<ClassAtom> {
    let atom = unsafe { RegisterClassExW(class) };
    if atom == 0 {
        return Err(eyre!(
            "RegisterClassExW failed: {}",
            windows::core::Error::from_win32()
        )
        .into());
    }
    Ok(ClassAtom(atom))
}

// A panic must not unwind across the `extern "system"` boundary.
fn handle_without_unwinding<W: WindowClass>(
    window_state: &mut W,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> bool {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        window_state.handle(message, wparam, lparam)
    }))
    .unwrap_or_else(|_| {
        error!("Panic while handling window message {message:#06x}");
        false
    })
}

extern "system" fn wndproc<W: WindowClass>(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_CREATE {
        unsafe {
            let create_struct: &CREATESTRUCTW = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(window, GWLP_USERDATA, create_struct.lpCreateParams as _);
        }
        return LRESULT(0);
    }

    let user_data = unsafe { GetWindowLongPtrW(window, GWLP_USERDATA) };
    let Some(mut state) = std::ptr::NonNull::<W>::new(user_data as *mut W) else {
        // Messages before WM_CREATE or after WM_DESTROY.
        return unsafe { DefWindowProcW(window, message, wparam, lparam) };
    };

    let handled = match message {
        WM_DESTROY => {
            unsafe {
                SetWindowLongPtrW(window, GWLP_USERDATA, 0);
                PostQuitMessage(0);
            }
            true
        }
        _ => handle_without_unwinding(unsafe { state.as_mut() }, message, wparam, lparam),
    };

    if handled {
        LRESULT(0)
    } else {
        unsafe { DefWindowProcW(window, message, wparam, lparam) }
    }
}
