use dx11_lab::gpu::GraphicsContext;
use dx11_lab::lab::Lab;
use dx11_lab::lab_error::LabResult;
use tracing::info;

/// Clears the back buffer and presents. Nothing else.
pub struct ClearLab;

impl Lab for ClearLab {
    const CLASS_NAME: &'static str = "DX11Lab02WindowClass";
    const CLEAR_COLOR: [f32; 4] = [0.1, 0.2, 0.3, 1.0];

    fn create(_graphics: &GraphicsContext) -> LabResult<Self> {
        info!("Clearing to {:?}", Self::CLEAR_COLOR);
        Ok(Self)
    }
}
