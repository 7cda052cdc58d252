use crate::lab_error::LabResult;
use eyre::eyre;
use std::ffi::CStr;
use tracing::debug;
use tracing::error;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::core::PCSTR;

/// HLSL text holding a `vs` and a `ps` entry point.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource {
    pub name: &'static str,
    pub hlsl: &'static str,
}

pub struct CompiledShader {
    blob: ID3DBlob,
}

impl CompiledShader {
    pub fn bytecode(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.blob.GetBufferPointer() as *const u8,
                self.blob.GetBufferSize(),
            )
        }
    }
}

fn compile_flags() -> u32 {
    let mut flags = D3DCOMPILE_ENABLE_STRICTNESS;
    if cfg!(debug_assertions) {
        flags |= D3DCOMPILE_DEBUG | D3DCOMPILE_SKIP_OPTIMIZATION;
    }
    flags
}

/// Compiles one entry point of `source` for `target` (e.g. `vs_5_0`).
/// Compiler diagnostics go to the log.
pub fn compile_shader(
    source: &ShaderSource,
    entry_point: &CStr,
    target: &CStr,
) -> LabResult<CompiledShader> {
    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompile(
            source.hlsl.as_ptr() as _,
            source.hlsl.len(),
            PCSTR::null(),
            None,
            None,
            PCSTR(entry_point.as_ptr() as _),
            PCSTR(target.as_ptr() as _),
            compile_flags(),
            0,
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    let diagnostics = error_blob.map(|blob| {
        let text = unsafe {
            std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize())
        };
        String::from_utf8_lossy(text).trim_end_matches('\0').trim().to_owned()
    });

    if let Err(e) = result {
        let diagnostics = diagnostics.unwrap_or_default();
        error!(
            "Shader Compile Error ({} {:?} {:?}): {}",
            source.name, entry_point, target, diagnostics
        );
        return Err(eyre!(
            "compiling {} {:?} for {:?} failed ({e}): {diagnostics}",
            source.name,
            entry_point,
            target
        )
        .into());
    }
    if let Some(warnings) = diagnostics.filter(|d| !d.is_empty()) {
        debug!("{} {:?}: {}", source.name, entry_point, warnings);
    }

    let blob = shader_blob.ok_or_else(|| eyre!("D3DCompile returned no bytecode"))?;
    Ok(CompiledShader { blob })
}
