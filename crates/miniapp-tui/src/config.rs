//! Launch configuration.
//!
//! The terminal stands in for the chat client, so everything the host would
//! normally provide (session token, platform, safe-area insets) is supplied
//! here and fed to a [`SimHost`].

use std::path::PathBuf;

use miniapp_core::{Host, HostInfo, PartialInsets, SimHost};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Inset list is not `top,right,bottom,left`.
    #[error("invalid insets {input:?}: {reason}")]
    InvalidInsets {
        /// Offending argument.
        input: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Where profiles are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageChoice {
    /// Lost on exit.
    Memory,
    /// redb database file.
    File(PathBuf),
}

/// Terminal client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TuiConfig {
    /// Session token the simulated host hands out.
    pub init_data: Option<String>,
    /// URL (or query string) the app was opened with.
    pub launch_url: Option<String>,
    /// Run inside a simulated host. `false` is development mode.
    pub host_enabled: bool,
    /// Platform the simulated host reports.
    pub platform: String,
    /// Device safe area reported by the host.
    pub safe_area: Option<PartialInsets>,
    /// Content safe area reported by the host.
    pub content_safe_area: Option<PartialInsets>,
    /// Profile storage.
    pub storage: StorageChoice,
    /// Log destination.
    pub log_file: PathBuf,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            init_data: None,
            launch_url: None,
            host_enabled: true,
            platform: "tdesktop".to_string(),
            safe_area: None,
            content_safe_area: None,
            storage: StorageChoice::File(PathBuf::from("miniapp-profiles.redb")),
            log_file: PathBuf::from("miniapp-tui.log"),
            log_level: "info".to_string(),
        }
    }
}

impl TuiConfig {
    /// Host environment described by this configuration.
    pub fn host(&self) -> Host<SimHost> {
        if !self.host_enabled {
            return Host::Unavailable;
        }

        let info = HostInfo { platform: self.platform.clone(), ..SimHost::default_info() };
        let mut host = SimHost::new().with_info(info);
        if let Some(init_data) = &self.init_data {
            host = host.with_init_data(init_data.clone());
        }
        if let Some(insets) = self.safe_area {
            host = host.with_safe_area(insets);
        }
        if let Some(insets) = self.content_safe_area {
            host = host.with_content_safe_area(insets);
        }
        Host::Available(host)
    }
}

/// Parse `top,right,bottom,left`. Empty entries are reported as missing.
pub fn parse_insets(input: &str) -> Result<PartialInsets, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidInsets { input: input.to_string(), reason };

    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let [top, right, bottom, left] = parts.as_slice() else {
        return Err(invalid(format!("expected 4 values, got {}", parts.len())));
    };

    let field = |value: &str| -> Result<Option<f64>, ConfigError> {
        if value.is_empty() {
            return Ok(None);
        }
        value.parse::<f64>().map(Some).map_err(|e| invalid(format!("{value:?}: {e}")))
    };

    Ok(PartialInsets {
        top: field(*top)?,
        right: field(*right)?,
        bottom: field(*bottom)?,
        left: field(*left)?,
    })
}
