use dx11_lab::geometry::TRIANGLE_INDICES;
use dx11_lab::geometry::TRIANGLE_VERTICES;
use dx11_lab::gpu::Frame;
use dx11_lab::gpu::GraphicsContext;
use dx11_lab::gpu::MeshPipeline;
use dx11_lab::gpu::ShaderSource;
use dx11_lab::lab::Lab;
use dx11_lab::lab_error::LabResult;
use tracing::info;

const SHADER: ShaderSource = ShaderSource {
    name: "triangle.hlsl",
    hlsl: include_str!("../shaders/triangle.hlsl"),
};

/// One colour-interpolated triangle, positions passed straight through as
/// clip-space coordinates.
pub struct TriangleLab {
    mesh: MeshPipeline,
}

impl Lab for TriangleLab {
    const CLASS_NAME: &'static str = "DX11Lab02WindowClass";
    const CLEAR_COLOR: [f32; 4] = [0.1, 0.2, 0.3, 1.0];

    fn create(graphics: &GraphicsContext) -> LabResult<Self> {
        let mesh = MeshPipeline::new(
            graphics.device()?,
            &TRIANGLE_VERTICES,
            &TRIANGLE_INDICES,
            &SHADER,
        )?;
        info!("Triangle ready ({} indices)", mesh.index_count());
        Ok(Self { mesh })
    }

    fn draw(&mut self, frame: &Frame<'_>) -> LabResult<()> {
        self.mesh.bind(frame.context)?;
        self.mesh.draw(frame.context);
        Ok(())
    }

    fn release(&mut self) {
        self.mesh.release();
    }
}
