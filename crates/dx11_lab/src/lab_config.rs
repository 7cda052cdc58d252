use crate::surface::ClientSize;

/// Start-up settings for one lab window.
///
/// Title and client size are fixed per program; the only runtime knobs come
/// from the command line:
///
/// * `-warp` / `/warp` - render with the WARP software driver
/// * `-verbose` / `/verbose` - log at `debug` instead of `info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabConfig {
    pub title: String,
    pub client_size: ClientSize,
    pub use_warp_device: bool,
    pub verbose: bool,
}

impl LabConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            client_size: ClientSize::default(),
            use_warp_device: false,
            verbose: false,
        }
    }

    /// Applies process arguments (without the program name). Unknown
    /// arguments are ignored.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if is_flag(arg, "warp") {
                self.use_warp_device = true;
            } else if is_flag(arg, "verbose") {
                self.verbose = true;
            }
        }
        self
    }

    pub fn from_env(title: impl Into<String>) -> Self {
        Self::new(title).with_args(std::env::args().skip(1))
    }

    /// Title shown in the caption bar.
    pub fn window_title(&self) -> String {
        match self.use_warp_device {
            true => format!("{} (WARP)", self.title),
            false => self.title.clone(),
        }
    }
}

fn is_flag(arg: &str, name: &str) -> bool {
    arg.strip_prefix('-')
        .or_else(|| arg.strip_prefix('/'))
        .is_some_and(|rest| rest.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_window() {
        let config = LabConfig::new("Lab 03 - Cube");
        assert_eq!(config.client_size, ClientSize::new(1280, 720));
        assert!(!config.use_warp_device);
        assert!(!config.verbose);
        assert_eq!(config.window_title(), "Lab 03 - Cube");
    }

    #[test]
    fn flags_accept_dash_or_slash_in_any_case() {
        let config = LabConfig::new("t").with_args(["/WARP", "-Verbose"]);
        assert!(config.use_warp_device);
        assert!(config.verbose);
        assert_eq!(config.window_title(), "t (WARP)");
    }

    #[test]
    fn unknown_arguments_are_ignored() {
        let config = LabConfig::new("t").with_args(["warp", "--warp", "-fullscreen", ""]);
        assert_eq!(config, LabConfig::new("t"));
    }
}
