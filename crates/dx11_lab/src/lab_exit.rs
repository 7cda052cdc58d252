/// How a lab's run ended, and the process exit code that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabExit {
    /// `WM_QUIT` arrived; carries its payload.
    Quit(i32),
    /// Class registration or window creation failed. The user already saw a
    /// message box.
    WindowSetupFailed,
    /// Device, surface, shader or buffer creation failed.
    GraphicsSetupFailed,
}

impl LabExit {
    pub fn code(self) -> i32 {
        match self {
            LabExit::Quit(code) => code,
            LabExit::WindowSetupFailed => 0,
            LabExit::GraphicsSetupFailed => -1,
        }
    }
}
