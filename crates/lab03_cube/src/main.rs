#[cfg(windows)]
mod behaviour;

use dx11_lab::lab_config::LabConfig;
use dx11_lab::lab_error::LabResult;
use dx11_lab::logging;

const TITLE: &str = "Lab 03 - Cube";

fn main() -> LabResult<()> {
    let config = LabConfig::from_env(TITLE);
    logging::init(&config)?;
    let code = run(&config)?;
    std::process::exit(code)
}

#[cfg(windows)]
fn run(config: &LabConfig) -> LabResult<i32> {
    Ok(dx11_lab::runner::run_lab::<behaviour::CubeLab>(config).code())
}

#[cfg(not(windows))]
fn run(_config: &LabConfig) -> LabResult<i32> {
    Err(dx11_lab::lab_error::unsupported_platform())
}
