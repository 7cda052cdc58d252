pub type LabResult<T, E = LabReport> = core::result::Result<T, E>;

/// Error type shared by every lab. Wraps an [`eyre::Report`] so that
/// `windows::core::Error` can be converted with `?`.
pub struct LabReport {
    inner: eyre::Report,
}

impl LabReport {
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self {
            inner: eyre::Report::msg(message),
        }
    }

    /// Adds a layer of context, like [`eyre::WrapErr::wrap_err`].
    pub fn wrap_err<D>(self, context: D) -> Self
    where
        D: std::fmt::Display + Send + Sync + 'static,
    {
        Self {
            inner: self.inner.wrap_err(context),
        }
    }

    pub fn into_report(self) -> eyre::Report {
        self.inner
    }
}

impl From<eyre::Report> for LabReport {
    fn from(report: eyre::Report) -> Self {
        Self { inner: report }
    }
}

impl std::fmt::Display for LabReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::fmt::Debug for LabReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for LabReport {
    fn from(error: windows::core::Error) -> Self {
        Self {
            inner: eyre::Report::new(WrappedWindowsError::from(error)),
        }
    }
}

#[cfg(windows)]
pub struct WrappedWindowsError {
    inner: windows::core::Error,
}

#[cfg(windows)]
impl WrappedWindowsError {
    pub fn code(&self) -> windows::core::HRESULT {
        self.inner.code()
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for WrappedWindowsError {
    fn from(error: windows::core::Error) -> Self {
        Self { inner: error }
    }
}

#[cfg(windows)]
impl std::error::Error for WrappedWindowsError {}

#[cfg(windows)]
impl std::fmt::Display for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.inner.message(), self.inner.code())
    }
}

#[cfg(windows)]
impl std::fmt::Debug for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// The labs only drive a Win32 window; everywhere else the binaries bail
/// out with this.
pub fn unsupported_platform() -> LabReport {
    LabReport::msg(format!(
        "the Direct3D 11 labs need Windows, this build targets {}",
        std::env::consts::OS
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::WrapErr;

    #[test]
    fn report_keeps_context_chain() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::other("swap chain went away"));
        let report: LabReport = result.wrap_err("resizing buffers").unwrap_err().into();
        let rendered = format!("{report:?}");
        assert!(rendered.contains("resizing buffers"));
        assert!(rendered.contains("swap chain went away"));
    }

    #[test]
    fn lab_report_wraps_further_context() {
        let report = LabReport::msg("CreateBuffer returned nothing").wrap_err("creating cube");
        let rendered = format!("{report:?}");
        assert!(rendered.contains("creating cube"));
        assert!(rendered.contains("CreateBuffer returned nothing"));
    }

    #[test]
    fn unsupported_platform_names_the_host() {
        let report = unsupported_platform();
        assert!(report.to_string().contains(std::env::consts::OS));
    }
}
