use super::buffers::create_immutable_buffer;
use super::buffers::set_debug_name;
use super::shader::ShaderSource;
use super::shader::compile_shader;
use crate::geometry::Vertex;
use crate::lab_error::LabResult;
use crate::teardown::Owned;
use eyre::eyre;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::core::s;

/// An indexed triangle list with its shaders and input layout.
pub struct MeshPipeline {
    vertex_buffer: Owned<ID3D11Buffer>,
    index_buffer: Owned<ID3D11Buffer>,
    vertex_shader: Owned<ID3D11VertexShader>,
    pixel_shader: Owned<ID3D11PixelShader>,
    input_layout: Owned<ID3D11InputLayout>,
    index_count: u32,
}

impl MeshPipeline {
    pub fn new(
        device: &ID3D11Device,
        vertices: &[Vertex],
        indices: &[u16],
        shader: &ShaderSource,
    ) -> LabResult<Self> {
        let vertex_buffer = Owned::new(
            "vertex buffer",
            create_immutable_buffer(device, vertices, D3D11_BIND_VERTEX_BUFFER, "VertexBuffer")?,
        );
        let index_buffer = Owned::new(
            "index buffer",
            create_immutable_buffer(device, indices, D3D11_BIND_INDEX_BUFFER, "IndexBuffer")?,
        );

        let vs_blob = compile_shader(shader, c"vs", c"vs_5_0")?;
        let mut vertex_shader = None;
        unsafe { device.CreateVertexShader(vs_blob.bytecode(), None, Some(&mut vertex_shader)) }?;
        let vertex_shader = vertex_shader.ok_or_else(|| eyre!("CreateVertexShader returned nothing"))?;
        set_debug_name(&vertex_shader, "VertexShader");

        let ps_blob = compile_shader(shader, c"ps", c"ps_5_0")?;
        let mut pixel_shader = None;
        unsafe { device.CreatePixelShader(ps_blob.bytecode(), None, Some(&mut pixel_shader)) }?;
        let pixel_shader = pixel_shader.ok_or_else(|| eyre!("CreatePixelShader returned nothing"))?;
        set_debug_name(&pixel_shader, "PixelShader");

        let layout = [
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("POSITION"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: 0,
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("COLOR"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R8G8B8A8_UNORM,
                InputSlot: 0,
                AlignedByteOffset: std::mem::offset_of!(Vertex, color) as u32,
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
        ];
        let mut input_layout = None;
        unsafe { device.CreateInputLayout(&layout, vs_blob.bytecode(), Some(&mut input_layout)) }?;
        let input_layout = input_layout.ok_or_else(|| eyre!("CreateInputLayout returned nothing"))?;
        set_debug_name(&input_layout, "InputLayout");

        Ok(Self {
            vertex_buffer,
            index_buffer,
            vertex_shader: Owned::new("vertex shader", vertex_shader),
            pixel_shader: Owned::new("pixel shader", pixel_shader),
            input_layout: Owned::new("input layout", input_layout),
            index_count: indices.len() as u32,
        })
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Sets input assembler state and both shaders.
    pub fn bind(&self, context: &ID3D11DeviceContext) -> LabResult<()> {
        let stride = std::mem::size_of::<Vertex>() as u32;
        let offset = 0u32;
        let vertex_buffer = self.vertex_buffer.live()?;
        unsafe {
            context.IASetVertexBuffers(
                0,
                1,
                Some(&Some(vertex_buffer.clone())),
                Some(&stride),
                Some(&offset),
            );
            context.IASetIndexBuffer(self.index_buffer.live()?, DXGI_FORMAT_R16_UINT, 0);
            context.IASetInputLayout(self.input_layout.live()?);
            context.IASetPrimitiveTopology(D3D11_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
            context.VSSetShader(self.vertex_shader.live()?, None);
            context.PSSetShader(self.pixel_shader.live()?, None);
        }
        Ok(())
    }

    pub fn draw(&self, context: &ID3D11DeviceContext) {
        unsafe { context.DrawIndexed(self.index_count, 0, 0) };
    }

    /// Layout and shaders first, then the buffers they read.
    pub fn release(&mut self) {
        self.input_layout.release();
        self.pixel_shader.release();
        self.vertex_shader.release();
        self.index_buffer.release();
        self.vertex_buffer.release();
    }
}

impl Drop for MeshPipeline {
    fn drop(&mut self) {
        self.release();
    }
}
