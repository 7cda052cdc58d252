use crate::lab_error::LabResult;
use crate::surface::ClientSize;
use crate::window_class::ClassAtom;
use widestring::U16CStr;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;

/// Creates an overlapped window whose client area is `client_size`.
///
/// `window_state` is handed to the window procedure through `WM_CREATE` and
/// must stay valid until the window is destroyed.
pub fn create_window<W>(
    our_module: HMODULE,
    class: ClassAtom,
    title: &U16CStr,
    client_size: ClientSize,
    window_state: *mut W,
) -> LabResult<HWND> {
    let mut window_rect = RECT {
        left: 0,
        top: 0,
        right: client_size.width as i32,
        bottom: client_size.height as i32,
    };
    unsafe { AdjustWindowRect(&mut window_rect, WS_OVERLAPPEDWINDOW, false)? };

    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class.as_pcwstr(),
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            window_rect.right - window_rect.left,
            window_rect.bottom - window_rect.top,
            None,
            None,
            Some(our_module.into()),
            Some(window_state as _),
        )
    }?;
    Ok(hwnd)
}
