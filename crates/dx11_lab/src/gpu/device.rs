use crate::adapter::adapter_name;
use crate::adapter::is_basic_render_driver;
use crate::lab_config::LabConfig;
use crate::lab_error::LabResult;
use eyre::eyre;
use tracing::debug;
use tracing::info;
use tracing::warn;
use windows::Win32::Foundation::HMODULE;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::*;
use windows::core::Interface;

const FEATURE_LEVELS: [D3D_FEATURE_LEVEL; 1] = [D3D_FEATURE_LEVEL_11_0];

pub struct LabDevice {
    pub device: ID3D11Device,
    pub context: ID3D11DeviceContext,
    /// The factory that owns the device's adapter; swap chains must come
    /// from it.
    pub factory: IDXGIFactory,
}

pub fn create_device(config: &LabConfig) -> LabResult<LabDevice> {
    let (device, context) = if config.use_warp_device {
        info!("Using WARP adapter.");
        create_device_on(None, D3D_DRIVER_TYPE_WARP)?
    } else {
        let factory: IDXGIFactory1 = unsafe { CreateDXGIFactory1() }?;
        let adapter = get_hardware_adapter(&factory)?;
        create_device_on(Some(&adapter), D3D_DRIVER_TYPE_UNKNOWN)?
    };

    let dxgi_device: IDXGIDevice = device.cast()?;
    let adapter = unsafe { dxgi_device.GetAdapter() }?;
    let factory: IDXGIFactory = unsafe { adapter.GetParent() }?;

    Ok(LabDevice {
        device,
        context,
        factory,
    })
}

/// First adapter that is not DXGI's software rasterizer.
fn get_hardware_adapter(factory: &IDXGIFactory1) -> LabResult<IDXGIAdapter> {
    for index in 0.. {
        let adapter = match unsafe { factory.EnumAdapters(index) } {
            Ok(adapter) => adapter,
            Err(e) if e.code() == DXGI_ERROR_NOT_FOUND => break,
            Err(e) => return Err(e.into()),
        };
        let desc = unsafe { adapter.GetDesc() }?;
        let name = adapter_name(&desc.Description);
        if is_basic_render_driver(&name) {
            debug!("Skipping adapter {index}: {name}");
            continue;
        }
        info!("Using hardware adapter: {name}");
        return Ok(adapter);
    }
    Err(eyre!("No hardware adapter found").into())
}

fn create_device_on(
    adapter: Option<&IDXGIAdapter>,
    driver_type: D3D_DRIVER_TYPE,
) -> LabResult<(ID3D11Device, ID3D11DeviceContext)> {
    if cfg!(debug_assertions) {
        match try_create(adapter, driver_type, D3D11_CREATE_DEVICE_DEBUG) {
            Ok(created) => {
                info!("D3D11 Debug Layer Enabled");
                return Ok(created);
            }
            Err(e) => warn!("Warning: D3D11 Debug Layer unavailable ({e}), retrying without it."),
        }
    }
    try_create(adapter, driver_type, D3D11_CREATE_DEVICE_FLAG(0))
}

fn try_create(
    adapter: Option<&IDXGIAdapter>,
    driver_type: D3D_DRIVER_TYPE,
    flags: D3D11_CREATE_DEVICE_FLAG,
) -> LabResult<(ID3D11Device, ID3D11DeviceContext)> {
    let mut device = None;
    let mut context = None;
    let mut obtained_level = D3D_FEATURE_LEVEL::default();
    unsafe {
        D3D11CreateDevice(
            adapter,
            driver_type,
            HMODULE::default(),
            flags,
            Some(&FEATURE_LEVELS),
            D3D11_SDK_VERSION,
            Some(&mut device),
            Some(&mut obtained_level),
            Some(&mut context),
        )
    }?;

    if obtained_level != D3D_FEATURE_LEVEL_11_0 {
        return Err(eyre!("Device came up at {obtained_level:?}, need D3D_FEATURE_LEVEL_11_0").into());
    }

    match (device, context) {
        (Some(device), Some(context)) => Ok((device, context)),
        _ => Err(eyre!("D3D11CreateDevice returned no device").into()),
    }
}

/// Dumps objects still alive on `device` to the debugger output.
pub fn report_live_objects(device: &ID3D11Device) {
    match device.cast::<ID3D11Debug>() {
        Ok(debug) => {
            if let Err(e) =
                unsafe { debug.ReportLiveDeviceObjects(D3D11_RLDO_DETAIL | D3D11_RLDO_IGNORE_INTERNAL) }
            {
                warn!("ReportLiveDeviceObjects failed: {e}");
            }
        }
        Err(_) => debug!("No debug layer, skipping live object report"),
    }
}
