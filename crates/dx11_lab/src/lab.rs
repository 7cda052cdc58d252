use crate::clock::FrameTick;
use crate::gpu::Frame;
use crate::gpu::GraphicsContext;
use crate::lab_error::LabResult;

/// One teaching program: the GPU objects it owns on top of the shared
/// [`GraphicsContext`] and what it records each frame.
pub trait Lab: Sized {
    /// Window class name registered for this program.
    const CLASS_NAME: &'static str;
    const CLEAR_COLOR: [f32; 4];

    /// Runs once after the graphics context exists. An error aborts
    /// startup.
    fn create(graphics: &GraphicsContext) -> LabResult<Self>;

    /// Arrow keys and friends. `key` is the virtual-key code.
    fn on_key(&mut self, _key: u8, _held: bool) {}

    fn update(&mut self, _tick: FrameTick) {}

    /// Records draw calls after the back buffer is cleared and the
    /// viewport set.
    fn draw(&mut self, _frame: &Frame<'_>) -> LabResult<()> {
        Ok(())
    }

    /// Releases the lab's GPU objects. Called before the graphics context
    /// goes away and possibly more than once.
    fn release(&mut self) {}
}
