use crate::lab_error::LabResult;
use eyre::eyre;
use tracing::debug;
use windows::Win32::Graphics::Direct3D::WKPDID_D3DDebugObjectName;
use windows::Win32::Graphics::Direct3D11::*;

/// How a constant buffer is refreshed each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantUsage {
    /// GPU-only memory, written with `UpdateSubresource`.
    Default,
    /// CPU-writable memory, written with `Map(WRITE_DISCARD)`.
    Dynamic,
}

/// Labels a device child for the debug layer and graphics debuggers.
/// Failure only costs the label.
pub fn set_debug_name(child: &ID3D11DeviceChild, name: &str) {
    let result = unsafe {
        child.SetPrivateData(
            &WKPDID_D3DDebugObjectName,
            name.len() as u32,
            Some(name.as_ptr() as _),
        )
    };
    if let Err(e) = result {
        debug!("Could not name {name}: {e}");
    }
}

/// Uploads `data` once into an `IMMUTABLE` buffer.
pub fn create_immutable_buffer<T: Copy>(
    device: &ID3D11Device,
    data: &[T],
    bind: D3D11_BIND_FLAG,
    name: &str,
) -> LabResult<ID3D11Buffer> {
    let desc = D3D11_BUFFER_DESC {
        ByteWidth: std::mem::size_of_val(data) as u32,
        Usage: D3D11_USAGE_IMMUTABLE,
        BindFlags: bind.0 as u32,
        ..Default::default()
    };
    let initial = D3D11_SUBRESOURCE_DATA {
        pSysMem: data.as_ptr() as _,
        ..Default::default()
    };

    let mut buffer = None;
    unsafe { device.CreateBuffer(&desc, Some(&initial), Some(&mut buffer)) }?;
    let buffer = buffer.ok_or_else(|| eyre!("CreateBuffer returned no buffer for {name}"))?;
    set_debug_name(&buffer, name);
    debug!("Created {name} ({} bytes)", desc.ByteWidth);
    Ok(buffer)
}

/// Creates an uninitialized constant buffer sized for one `T`.
pub fn create_constant_buffer<T>(
    device: &ID3D11Device,
    usage: ConstantUsage,
    name: &str,
) -> LabResult<ID3D11Buffer> {
    let (usage, cpu_access) = match usage {
        ConstantUsage::Default => (D3D11_USAGE_DEFAULT, 0),
        ConstantUsage::Dynamic => (D3D11_USAGE_DYNAMIC, D3D11_CPU_ACCESS_WRITE.0 as u32),
    };
    let desc = D3D11_BUFFER_DESC {
        ByteWidth: std::mem::size_of::<T>() as u32,
        Usage: usage,
        BindFlags: D3D11_BIND_CONSTANT_BUFFER.0 as u32,
        CPUAccessFlags: cpu_access,
        ..Default::default()
    };

    let mut buffer = None;
    unsafe { device.CreateBuffer(&desc, None, Some(&mut buffer)) }?;
    let buffer = buffer.ok_or_else(|| eyre!("CreateBuffer returned no buffer for {name}"))?;
    set_debug_name(&buffer, name);
    Ok(buffer)
}

/// Overwrites a [`ConstantUsage::Default`] buffer.
pub fn update_constant<T: Copy>(context: &ID3D11DeviceContext, buffer: &ID3D11Buffer, value: &T) {
    unsafe {
        context.UpdateSubresource(buffer, 0, None, value as *const T as _, 0, 0);
    }
}

/// Overwrites a [`ConstantUsage::Dynamic`] buffer.
pub fn write_constant<T: Copy>(
    context: &ID3D11DeviceContext,
    buffer: &ID3D11Buffer,
    value: &T,
) -> LabResult<()> {
    let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
    unsafe { context.Map(buffer, 0, D3D11_MAP_WRITE_DISCARD, 0, Some(&mut mapped)) }?;
    unsafe {
        std::ptr::copy_nonoverlapping(value as *const T, mapped.pData as *mut T, 1);
        context.Unmap(buffer, 0);
    }
    Ok(())
}
