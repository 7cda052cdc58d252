use dx11_lab::camera::HeldKeys;
use dx11_lab::camera::OrbitCamera;
use dx11_lab::clock::FrameTick;
use dx11_lab::geometry::CUBE_INDICES;
use dx11_lab::geometry::CUBE_VERTICES;
use dx11_lab::gpu::Frame;
use dx11_lab::gpu::GraphicsContext;
use dx11_lab::gpu::MeshPipeline;
use dx11_lab::gpu::ShaderSource;
use dx11_lab::gpu::buffers::ConstantUsage;
use dx11_lab::gpu::buffers::create_constant_buffer;
use dx11_lab::gpu::buffers::update_constant;
use dx11_lab::gpu::buffers::write_constant;
use dx11_lab::lab::Lab;
use dx11_lab::lab_error::LabResult;
use dx11_lab::teardown::Owned;
use dx11_lab::transforms::MatrixConstants;
use dx11_lab::transforms::model_matrix;
use dx11_lab::transforms::view_projection;
use tracing::debug;
use tracing::info;
use windows::Win32::Graphics::Direct3D11::ID3D11Buffer;

const SHADER: ShaderSource = ShaderSource {
    name: "cube.hlsl",
    hlsl: include_str!("../shaders/cube.hlsl"),
};

/// A cube spinning about Y, watched by a camera the arrow keys orbit.
pub struct CubeLab {
    mesh: MeshPipeline,
    /// Slot b0, rewritten with `UpdateSubresource`.
    model_buffer: Owned<ID3D11Buffer>,
    /// Slot b1, rewritten with `Map(WRITE_DISCARD)`.
    view_proj_buffer: Owned<ID3D11Buffer>,
    keys: HeldKeys,
    camera: OrbitCamera,
    elapsed: f32,
}

impl Lab for CubeLab {
    const CLASS_NAME: &'static str = "DX11Lab03WindowClass";
    const CLEAR_COLOR: [f32; 4] = [0.25, 0.25, 0.25, 1.0];

    fn create(graphics: &GraphicsContext) -> LabResult<Self> {
        let device = graphics.device()?;
        let mesh = MeshPipeline::new(device, &CUBE_VERTICES, &CUBE_INDICES, &SHADER)?;
        let model_buffer = create_constant_buffer::<MatrixConstants>(
            device,
            ConstantUsage::Default,
            "ModelBuffer",
        )?;
        let view_proj_buffer = create_constant_buffer::<MatrixConstants>(
            device,
            ConstantUsage::Dynamic,
            "ViewProjBuffer",
        )?;
        info!("Cube ready ({} indices)", mesh.index_count());

        Ok(Self {
            mesh,
            model_buffer: Owned::new("model buffer", model_buffer),
            view_proj_buffer: Owned::new("view-projection buffer", view_proj_buffer),
            keys: HeldKeys::default(),
            camera: OrbitCamera::default(),
            elapsed: 0.0,
        })
    }

    fn on_key(&mut self, key: u8, held: bool) {
        if self.keys.set(key, held) {
            debug!("Camera keys now {:?}", self.keys);
        }
    }

    fn update(&mut self, tick: FrameTick) {
        self.camera.update(self.keys, tick.delta);
        self.elapsed = tick.elapsed;
    }

    fn draw(&mut self, frame: &Frame<'_>) -> LabResult<()> {
        let model_buffer = self.model_buffer.live()?;
        let view_proj_buffer = self.view_proj_buffer.live()?;

        update_constant(
            frame.context,
            model_buffer,
            &MatrixConstants::from(model_matrix(self.elapsed)),
        );
        write_constant(
            frame.context,
            view_proj_buffer,
            &MatrixConstants::from(view_projection(&self.camera, frame.size)),
        )?;

        self.mesh.bind(frame.context)?;
        unsafe {
            frame.context.VSSetConstantBuffers(
                0,
                Some(&[Some(model_buffer.clone()), Some(view_proj_buffer.clone())]),
            );
        }
        self.mesh.draw(frame.context);
        Ok(())
    }

    fn release(&mut self) {
        self.view_proj_buffer.release();
        self.model_buffer.release();
        self.mesh.release();
    }
}
