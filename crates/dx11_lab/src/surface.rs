//! Window-size bookkeeping and the resize policy for the presentation
//! surface.

use crate::lab_error::LabResult;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// `SIZE_MINIMIZED` from `WM_SIZE`'s wparam.
pub const SIZE_MINIMIZED: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSize {
    pub width: u32,
    pub height: u32,
}

impl ClientSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

impl Default for ClientSize {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEvent {
    pub minimized: bool,
    pub size: ClientSize,
}

impl SizeEvent {
    /// Decodes the parameters of a `WM_SIZE` message.
    pub fn from_wm_size(wparam: usize, lparam: isize) -> Self {
        let bits = lparam as usize;
        Self {
            minimized: wparam == SIZE_MINIMIZED,
            size: ClientSize::new((bits & 0xFFFF) as u32, ((bits >> 16) & 0xFFFF) as u32),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Ignored,
    Resized(ClientSize),
    Failed,
}

/// Something that owns a swap chain plus the render-target view bound to
/// its back buffer.
pub trait SwapSurface {
    fn client_size(&self) -> ClientSize;
    fn set_client_size(&mut self, size: ClientSize);
    fn has_target(&self) -> bool;
    /// Unbinds and releases the render-target view. Must leave no
    /// outstanding references to the back buffer.
    fn release_target(&mut self);
    fn resize_buffers(&mut self, size: ClientSize) -> LabResult<()>;
    /// Creates the render-target view on the current back buffer.
    fn create_target(&mut self) -> LabResult<()>;
}

/// Reacts to a `WM_SIZE` notification.
///
/// Minimize notifications and zero-sized areas leave the surface alone. A
/// failed buffer resize keeps the old buffers, so the target is rebuilt on
/// them and the old client size stays in effect.
pub fn resize<S: SwapSurface + ?Sized>(surface: &mut S, event: SizeEvent) -> ResizeOutcome {
    if event.minimized || event.size.is_empty() {
        debug!(?event, "Ignoring size notification");
        return ResizeOutcome::Ignored;
    }

    surface.release_target();

    if let Err(e) = surface.resize_buffers(event.size) {
        warn!("ResizeBuffers to {:?} failed: {:?}", event.size, e);
        if let Err(e) = surface.create_target() {
            warn!("Restoring the render target failed: {:?}", e);
        }
        return ResizeOutcome::Failed;
    }

    if let Err(e) = surface.create_target() {
        warn!("CreateRenderTargetView after resize failed: {:?}", e);
        return ResizeOutcome::Failed;
    }

    surface.set_client_size(event.size);
    info!("Resized to {}x{}", event.size.width, event.size.height);
    ResizeOutcome::Resized(event.size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeSurface {
        size: ClientSize,
        buffers: ClientSize,
        target: Option<ClientSize>,
        fail_resize: bool,
        fail_target: bool,
        calls: Vec<&'static str>,
    }

    impl FakeSurface {
        fn live() -> Self {
            let size = ClientSize::default();
            Self {
                size,
                buffers: size,
                target: Some(size),
                ..Default::default()
            }
        }
    }

    impl SwapSurface for FakeSurface {
        fn client_size(&self) -> ClientSize {
            self.size
        }

        fn set_client_size(&mut self, size: ClientSize) {
            self.size = size;
        }

        fn has_target(&self) -> bool {
            self.target.is_some()
        }

        fn release_target(&mut self) {
            self.calls.push("release_target");
            self.target = None;
        }

        fn resize_buffers(&mut self, size: ClientSize) -> LabResult<()> {
            self.calls.push("resize_buffers");
            assert!(self.target.is_none(), "back buffer still referenced");
            if self.fail_resize {
                return Err(eyre::eyre!("DXGI_ERROR_INVALID_CALL").into());
            }
            self.buffers = size;
            Ok(())
        }

        fn create_target(&mut self) -> LabResult<()> {
            self.calls.push("create_target");
            if self.fail_target {
                return Err(eyre::eyre!("E_OUTOFMEMORY").into());
            }
            self.target = Some(self.buffers);
            Ok(())
        }
    }

    fn size_event(wparam: usize, width: u16, height: u16) -> SizeEvent {
        SizeEvent::from_wm_size(wparam, ((height as isize) << 16) | width as isize)
    }

    #[test]
    fn decodes_wm_size_parameters() {
        let event = size_event(0, 1920, 1080);
        assert!(!event.minimized);
        assert_eq!(event.size, ClientSize::new(1920, 1080));

        let event = size_event(SIZE_MINIMIZED, 0, 0);
        assert!(event.minimized);
        assert!(event.size.is_empty());
    }

    #[test]
    fn resize_rebuilds_target_and_updates_client_size() {
        let mut surface = FakeSurface::live();
        let outcome = resize(&mut surface, size_event(0, 800, 600));

        assert_eq!(outcome, ResizeOutcome::Resized(ClientSize::new(800, 600)));
        assert!(surface.has_target());
        assert_eq!(surface.target, Some(ClientSize::new(800, 600)));
        assert_eq!(surface.client_size(), ClientSize::new(800, 600));
        assert_eq!(
            surface.calls,
            ["release_target", "resize_buffers", "create_target"]
        );
    }

    #[test]
    fn zero_dimension_or_minimize_is_a_no_op() {
        for event in [
            size_event(0, 0, 600),
            size_event(0, 800, 0),
            size_event(SIZE_MINIMIZED, 0, 0),
            size_event(SIZE_MINIMIZED, 800, 600),
        ] {
            let mut surface = FakeSurface::live();
            assert_eq!(resize(&mut surface, event), ResizeOutcome::Ignored);
            assert!(surface.calls.is_empty());
            assert!(surface.has_target());
            assert_eq!(surface.client_size(), ClientSize::default());
        }
    }

    #[test]
    fn failed_buffer_resize_restores_previous_target() {
        let mut surface = FakeSurface {
            fail_resize: true,
            ..FakeSurface::live()
        };
        assert_eq!(resize(&mut surface, size_event(0, 640, 480)), ResizeOutcome::Failed);
        assert!(surface.has_target());
        assert_eq!(surface.target, Some(ClientSize::default()));
        assert_eq!(surface.client_size(), ClientSize::default());
    }

    #[test]
    fn failed_target_creation_leaves_surface_without_target() {
        let mut surface = FakeSurface {
            fail_target: true,
            ..FakeSurface::live()
        };
        assert_eq!(resize(&mut surface, size_event(0, 640, 480)), ResizeOutcome::Failed);
        assert!(!surface.has_target());
        assert_eq!(surface.client_size(), ClientSize::default());

        // A later successful resize brings rendering back.
        surface.fail_target = false;
        assert_eq!(
            resize(&mut surface, size_event(0, 640, 480)),
            ResizeOutcome::Resized(ClientSize::new(640, 480))
        );
        assert!(surface.has_target());
    }

    #[test]
    fn aspect_ratio_guards_zero_height() {
        assert_eq!(ClientSize::new(1280, 720).aspect_ratio(), 1280.0 / 720.0);
        assert_eq!(ClientSize::new(10, 0).aspect_ratio(), 1.0);
    }
}
