//! Environment summary for bug reports.

use crate::host::Host;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportInfo {
    pub host_version: String,
    pub platform: String,
    pub arch: String,
    pub version: String,
}

impl SupportInfo {
    pub fn new(host_version: impl Into<String>) -> Self {
        Self {
            host_version: host_version.into(),
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            version: crate::VERSION.to_string(),
        }
    }

    pub fn collect(host: &dyn Host) -> Self {
        Self::new(host.host_version())
    }

    /// Bullet list, one line per field.
    pub fn render(&self) -> String {
        format!(
            "- Host ver.:     {}\n- Platform:      {}\n- Arch:          {}\n- Plugin ver.:   {}\n",
            self.host_version, self.platform, self.arch, self.version
        )
    }
}
