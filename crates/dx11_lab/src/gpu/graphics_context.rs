use super::buffers::set_debug_name;
use super::device::LabDevice;
use super::device::create_device;
use super::device::report_live_objects;
use crate::lab_config::LabConfig;
use crate::lab_error::LabResult;
use crate::surface::ClientSize;
use crate::surface::SwapSurface;
use crate::teardown::Owned;
use eyre::eyre;
use tracing::info;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

const BUFFER_COUNT: u32 = 2;
/// Present after one vertical blank.
const SYNC_INTERVAL: u32 = 1;

/// What the lab's draw callback gets for one frame.
pub struct Frame<'a> {
    pub device: &'a ID3D11Device,
    pub context: &'a ID3D11DeviceContext,
    pub size: ClientSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// No render target (a resize failed); nothing was drawn.
    Skipped,
}

/// Device, immediate context, swap chain and the back buffer's
/// render-target view of one window.
pub struct GraphicsContext {
    device: Owned<ID3D11Device>,
    context: Owned<ID3D11DeviceContext>,
    swap_chain: Owned<IDXGISwapChain>,
    render_target: Owned<ID3D11RenderTargetView>,
    client_size: ClientSize,
}

impl GraphicsContext {
    pub fn new(hwnd: HWND, config: &LabConfig) -> LabResult<Self> {
        let LabDevice {
            device,
            context,
            factory,
        } = create_device(config)?;

        let swap_chain = create_swap_chain(&factory, &device, hwnd, config.client_size)?;
        unsafe { factory.MakeWindowAssociation(hwnd, DXGI_MWA_NO_ALT_ENTER) }?;

        let mut graphics = Self {
            device: Owned::new("device", device),
            context: Owned::new("immediate context", context),
            swap_chain: Owned::new("swap chain", swap_chain),
            render_target: Owned::empty("render target view"),
            client_size: config.client_size,
        };
        graphics.create_target()?;
        info!(
            "Graphics ready at {}x{}",
            config.client_size.width, config.client_size.height
        );
        Ok(graphics)
    }

    pub fn device(&self) -> LabResult<&ID3D11Device> {
        self.device.live()
    }

    pub fn context(&self) -> LabResult<&ID3D11DeviceContext> {
        self.context.live()
    }

    /// Clears the back buffer, sets the viewport from the current client
    /// size, lets `draw` record its calls and presents.
    pub fn draw_frame<F>(&self, clear_color: &[f32; 4], draw: F) -> LabResult<FrameStatus>
    where
        F: FnOnce(&Frame<'_>) -> LabResult<()>,
    {
        let (Some(device), Some(context), Some(swap_chain), Some(target)) = (
            self.device.get(),
            self.context.get(),
            self.swap_chain.get(),
            self.render_target.get(),
        ) else {
            return Ok(FrameStatus::Skipped);
        };

        let viewport = D3D11_VIEWPORT {
            TopLeftX: 0.0,
            TopLeftY: 0.0,
            Width: self.client_size.width as f32,
            Height: self.client_size.height as f32,
            MinDepth: 0.0,
            MaxDepth: 1.0,
        };

        unsafe {
            context.ClearState();
            context.OMSetRenderTargets(Some(&[Some(target.clone())]), None);
            context.ClearRenderTargetView(target, clear_color);
            context.RSSetViewports(Some(&[viewport]));
        }

        draw(&Frame {
            device,
            context,
            size: self.client_size,
        })?;

        unsafe { swap_chain.Present(SYNC_INTERVAL, DXGI_PRESENT(0)) }.ok()?;
        Ok(FrameStatus::Presented)
    }

    /// Releases everything in reverse creation order. Safe to call more
    /// than once.
    pub fn release(&mut self) {
        if let Some(context) = self.context.get() {
            unsafe {
                context.ClearState();
                context.Flush();
            }
        }
        self.render_target.release();
        self.swap_chain.release();
        if cfg!(debug_assertions) {
            if let Some(device) = self.device.get() {
                report_live_objects(device);
            }
        }
        self.context.release();
        self.device.release();
    }
}

impl Drop for GraphicsContext {
    fn drop(&mut self) {
        self.release();
    }
}

impl SwapSurface for GraphicsContext {
    fn client_size(&self) -> ClientSize {
        self.client_size
    }

    fn set_client_size(&mut self, size: ClientSize) {
        self.client_size = size;
    }

    fn has_target(&self) -> bool {
        self.render_target.is_live()
    }

    fn release_target(&mut self) {
        if let Some(context) = self.context.get() {
            unsafe { context.OMSetRenderTargets(None, None) };
        }
        self.render_target.release();
    }

    fn resize_buffers(&mut self, size: ClientSize) -> LabResult<()> {
        let swap_chain = self.swap_chain.live()?;
        unsafe {
            swap_chain.ResizeBuffers(
                BUFFER_COUNT,
                size.width,
                size.height,
                DXGI_FORMAT_UNKNOWN,
                DXGI_SWAP_CHAIN_FLAG(0),
            )
        }?;
        Ok(())
    }

    fn create_target(&mut self) -> LabResult<()> {
        let device = self.device.live()?;
        let swap_chain = self.swap_chain.live()?;
        let back_buffer: ID3D11Texture2D = unsafe { swap_chain.GetBuffer(0) }?;

        let mut view = None;
        unsafe { device.CreateRenderTargetView(&back_buffer, None, Some(&mut view)) }?;
        let view = view.ok_or_else(|| eyre!("CreateRenderTargetView returned no view"))?;
        set_debug_name(&view, "BackBufferRTV");

        self.render_target.replace(view);
        Ok(())
    }
}

fn create_swap_chain(
    factory: &IDXGIFactory,
    device: &ID3D11Device,
    hwnd: HWND,
    size: ClientSize,
) -> LabResult<IDXGISwapChain> {
    let desc = DXGI_SWAP_CHAIN_DESC {
        BufferDesc: DXGI_MODE_DESC {
            Width: size.width,
            Height: size.height,
            RefreshRate: DXGI_RATIONAL {
                Numerator: 0,
                Denominator: 1,
            },
            Format: DXGI_FORMAT_R8G8B8A8_UNORM,
            ScanlineOrdering: DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
            Scaling: DXGI_MODE_SCALING_UNSPECIFIED,
        },
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: BUFFER_COUNT,
        OutputWindow: hwnd,
        Windowed: TRUE,
        SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
        Flags: 0,
    };

    let mut swap_chain = None;
    unsafe { factory.CreateSwapChain(device, &desc, &mut swap_chain) }.ok()?;
    Ok(swap_chain.ok_or_else(|| eyre!("CreateSwapChain returned no swap chain"))?)
}
