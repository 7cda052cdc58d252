use crate::clock::FrameClock;
use crate::create_window::create_window;
use crate::gpu::FrameStatus;
use crate::gpu::GraphicsContext;
use crate::lab::Lab;
use crate::lab_config::LabConfig;
use crate::lab_error::LabResult;
use crate::lab_exit::LabExit;
use crate::surface;
use crate::surface::SizeEvent;
use crate::window_class::WindowClass;
use crate::window_class::create_window_class_struct;
use crate::window_class::register_window_class;
use eyre::WrapErr;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use widestring::U16CString;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::UpdateWindow;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::PCWSTR;
use windows::core::w;

/// Everything the window procedure and the render loop share.
pub struct LabWindow<L: Lab> {
    graphics: Option<GraphicsContext>,
    lab: Option<L>,
    clock: FrameClock,
}

impl<L: Lab> LabWindow<L> {
    fn new() -> Self {
        Self {
            graphics: None,
            lab: None,
            clock: FrameClock::start(),
        }
    }

    fn bind_graphics(&mut self, hwnd: HWND, config: &LabConfig) -> LabResult<()> {
        let graphics = GraphicsContext::new(hwnd, config)
            .map_err(|e| e.wrap_err("creating graphics context"))?;
        let graphics = self.graphics.insert(graphics);
        let lab = L::create(graphics)
            .map_err(|e| e.wrap_err(format!("creating {}", L::CLASS_NAME)))?;
        self.lab = Some(lab);
        self.clock = FrameClock::start();
        Ok(())
    }

    fn render_frame(&mut self) {
        let (Some(graphics), Some(lab)) = (self.graphics.as_ref(), self.lab.as_mut()) else {
            return;
        };
        let tick = self.clock.tick();
        lab.update(tick);
        match graphics.draw_frame(&L::CLEAR_COLOR, |frame| lab.draw(frame)) {
            Ok(FrameStatus::Presented) => {}
            Ok(FrameStatus::Skipped) => debug!("Frame skipped, no render target"),
            Err(e) => warn!("Frame failed: {e:?}"),
        }
    }

    /// Lab objects go before the context they were created from.
    fn teardown(&mut self) {
        if let Some(mut lab) = self.lab.take() {
            lab.release();
        }
        if let Some(mut graphics) = self.graphics.take() {
            graphics.release();
        }
    }
}

impl<L: Lab> WindowClass for LabWindow<L> {
    fn handle(&mut self, message: u32, wparam: WPARAM, lparam: LPARAM) -> bool {
        match message {
            WM_SIZE => {
                if let Some(graphics) = self.graphics.as_mut() {
                    surface::resize(graphics, SizeEvent::from_wm_size(wparam.0, lparam.0));
                }
                true
            }
            WM_KEYDOWN | WM_KEYUP => {
                if let (Some(lab), Ok(key)) = (self.lab.as_mut(), u8::try_from(wparam.0)) {
                    lab.on_key(key, message == WM_KEYDOWN);
                }
                true
            }
            // WM_PAINT included: frames come from the idle loop and
            // DefWindowProcW validates the region.
            _ => false,
        }
    }
}

/// Registers the class, opens the window, builds the graphics context and
/// the lab, then pumps messages until `WM_QUIT`.
pub fn run_lab<L: Lab>(config: &LabConfig) -> LabExit {
    info!("Starting {}", config.window_title());

    let state = Box::into_raw(Box::new(LabWindow::<L>::new()));
    let hwnd = match open_window::<L>(config, state) {
        Ok(hwnd) => hwnd,
        Err(e) => {
            error!("Window setup failed: {e:?}");
            show_error_box(&e.to_string());
            drop(unsafe { Box::from_raw(state) });
            return LabExit::WindowSetupFailed;
        }
    };

    unsafe {
        _ = ShowWindow(hwnd, SW_SHOW);
        _ = UpdateWindow(hwnd);
    }

    if let Err(e) = unsafe { (*state).bind_graphics(hwnd, config) } {
        error!("Graphics setup failed: {e:?}");
        unsafe {
            (*state).teardown();
            _ = DestroyWindow(hwnd);
        }
        drop(unsafe { Box::from_raw(state) });
        return LabExit::GraphicsSetupFailed;
    }

    let code = pump_messages(state);
    info!("Quit with code {code}");

    unsafe {
        (*state).teardown();
        // WM_DESTROY already cleared the window's pointer to `state`.
        drop(Box::from_raw(state));
    }
    LabExit::Quit(code)
}

fn open_window<L: Lab>(config: &LabConfig, state: *mut LabWindow<L>) -> LabResult<HWND> {
    let our_module = get_handle_to_file_used_to_create_the_calling_process()?;
    let class_name = U16CString::from_str(L::CLASS_NAME).wrap_err("class name")?;
    let title = U16CString::from_str(config.window_title()).wrap_err("window title")?;

    let window_class = create_window_class_struct::<LabWindow<L>>(our_module, &class_name)?;
    let atom =
        register_window_class(&window_class).map_err(|e| e.wrap_err("RegisterClassEx failed"))?;
    let hwnd = create_window(our_module, atom, &title, config.client_size, state)
        .map_err(|e| e.wrap_err("CreateWindow failed"))?;
    Ok(hwnd)
}

/// Drains every pending message, then renders one frame. Returns the
/// `WM_QUIT` payload.
fn pump_messages<L: Lab>(state: *mut LabWindow<L>) -> i32 {
    let mut message = MSG::default();
    loop {
        while unsafe { PeekMessageW(&mut message, None, 0, 0, PM_REMOVE) }.as_bool() {
            if message.message == WM_QUIT {
                return message.wParam.0 as i32;
            }
            unsafe {
                _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }
        }
        unsafe { (*state).render_frame() };
    }
}

fn show_error_box(text: &str) {
    let text = U16CString::from_str_truncate(text);
    unsafe {
        MessageBoxW(
            None,
            PCWSTR(text.as_ptr()),
            w!("Error"),
            MB_OK | MB_ICONERROR,
        );
    }
}

fn get_handle_to_file_used_to_create_the_calling_process() -> LabResult<HMODULE> {
    let mut out = Default::default();
    unsafe { GetModuleHandleExW(Default::default(), None, &mut out)? };
    Ok(out)
}
