use crate::lab_config::LabConfig;
use crate::lab_error::LabResult;
use eyre::WrapErr;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the report hooks and the global subscriber: one formatter on
/// stderr and a plain-text copy on the debugger output channel.
pub fn init(config: &LabConfig) -> LabResult<()> {
    color_eyre::install()?;

    let level = match config.verbose {
        true => LevelFilter::DEBUG,
        false => LevelFilter::INFO,
    };

    tracing_subscriber::registry()
        .with(level)
        .with(
            fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .with_target(false),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .without_time()
                .with_writer(DebugChannel::default),
        )
        .try_init()
        .wrap_err("installing the tracing subscriber")?;
    Ok(())
}

/// Writer for the debugger output window (`OutputDebugStringW`). Nothing is
/// written on other platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugChannel;

impl std::io::Write for DebugChannel {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        #[cfg(windows)]
        {
            use widestring::U16CString;
            use windows::Win32::System::Diagnostics::Debug::OutputDebugStringW;
            use windows::core::PCWSTR;

            let text = U16CString::from_str_truncate(String::from_utf8_lossy(buf));
            unsafe { OutputDebugStringW(PCWSTR(text.as_ptr())) };
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn debug_channel_accepts_everything() {
        let mut channel = DebugChannel;
        assert_eq!(channel.write(b"frame skipped\n").unwrap(), 14);
        channel.write_all("résumé\u{0}tail".as_bytes()).unwrap();
        channel.flush().unwrap();
    }
}
