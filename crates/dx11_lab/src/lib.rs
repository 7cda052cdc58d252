//! Shared plumbing for the Direct3D 11 labs: window class and message
//! pump, device and swap chain, mesh pipelines, an orbit camera and the
//! matrices that go with it.
//!
//! Everything that talks to Win32 or D3D11 is Windows-only; the rest builds
//! and tests anywhere.

pub mod adapter;
pub mod camera;
pub mod clock;
pub mod geometry;
pub mod lab_config;
pub mod lab_error;
pub mod lab_exit;
pub mod logging;
pub mod surface;
pub mod teardown;
pub mod transforms;

#[cfg(windows)]
pub mod create_window;
#[cfg(windows)]
pub mod gpu;
#[cfg(windows)]
pub mod lab;
#[cfg(windows)]
pub mod runner;
#[cfg(windows)]
pub mod window_class;
