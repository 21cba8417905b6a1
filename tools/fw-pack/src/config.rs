//! fw-pack.toml configuration
//!
//! Every field is optional; omitted values fall back to [`HA_SWITCH_LAYOUT`].
//!
//! ```toml
//! [firmware]
//! input = "../dimmer-coprocessor/.pio/build/tiny_dimmer/firmware.hex"
//! output = "./src/coprocessor.h"
//! guard = "_COP_H_"
//! array_name = "COPROCESSOR_FIRMWARE"
//! bytes_per_line = 12
//!
//! [version]
//! env_var = "VERSION"
//! default = "0.0.1"
//! define = "BUILD_VERSION"
//!
//! [output]
//! prefix = "ha_switch_"
//! board_env = "PIOENV"
//! ```

use ha_switch_shared::HA_SWITCH_LAYOUT;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::codegen::HeaderOptions;
use crate::error::{PackError, Result};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "fw-pack.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackConfig {
    #[serde(default)]
    pub firmware: FirmwareSection,
    #[serde(default)]
    pub version: VersionSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// Firmware image and generated header
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirmwareSection {
    pub input: PathBuf,
    pub output: PathBuf,
    pub guard: String,
    pub array_name: String,
    pub bytes_per_line: usize,
}

impl Default for FirmwareSection {
    fn default() -> Self {
        Self {
            input: PathBuf::from(HA_SWITCH_LAYOUT.firmware_input),
            output: PathBuf::from(HA_SWITCH_LAYOUT.header_output),
            guard: HA_SWITCH_LAYOUT.header_guard.to_string(),
            array_name: HA_SWITCH_LAYOUT.array_name.to_string(),
            bytes_per_line: HA_SWITCH_LAYOUT.bytes_per_line,
        }
    }
}

impl FirmwareSection {
    pub fn header_options(&self) -> HeaderOptions {
        HeaderOptions {
            guard: self.guard.clone(),
            array_name: self.array_name.clone(),
            bytes_per_line: self.bytes_per_line,
        }
    }
}

/// Version source and the define it is written to
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionSection {
    pub env_var: String,
    pub default: String,
    pub define: String,
}

impl Default for VersionSection {
    fn default() -> Self {
        Self {
            env_var: HA_SWITCH_LAYOUT.version_env.to_string(),
            default: HA_SWITCH_LAYOUT.default_version.to_string(),
            define: HA_SWITCH_LAYOUT.version_define.to_string(),
        }
    }
}

/// Output program naming
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub prefix: String,
    pub board_env: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            prefix: HA_SWITCH_LAYOUT.prog_name_prefix.to_string(),
            board_env: HA_SWITCH_LAYOUT.board_env.to_string(),
        }
    }
}

impl PackConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PackError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| PackError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse config from string
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `path` if given, otherwise `fw-pack.toml` when present, otherwise defaults.
    ///
    /// An explicitly requested file must exist.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    debug!("Using {}", default.display());
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_layout() {
        let config = PackConfig::parse("").unwrap();
        assert_eq!(
            config.firmware.input,
            PathBuf::from("../dimmer-coprocessor/.pio/build/tiny_dimmer/firmware.hex")
        );
        assert_eq!(config.firmware.output, PathBuf::from("./src/coprocessor.h"));
        assert_eq!(config.firmware.header_options(), HeaderOptions::default());
        assert_eq!(config.version.env_var, "VERSION");
        assert_eq!(config.version.default, "0.0.1");
        assert_eq!(config.version.define, "BUILD_VERSION");
        assert_eq!(config.output.prefix, "ha_switch_");
        assert_eq!(config.output.board_env, "PIOENV");
    }

    #[test]
    fn test_partial_override() {
        let config = PackConfig::parse(
            r#"
[firmware]
input = "fw.bin"
bytes_per_line = 16

[output]
prefix = "dimmer_"
"#,
        )
        .unwrap();
        assert_eq!(config.firmware.input, PathBuf::from("fw.bin"));
        assert_eq!(config.firmware.bytes_per_line, 16);
        assert_eq!(config.firmware.guard, "_COP_H_");
        assert_eq!(config.output.prefix, "dimmer_");
        assert_eq!(config.output.board_env, "PIOENV");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(PackConfig::parse("[firmware]\ninptu = \"x\"\n").is_err());
    }

    #[test]
    fn test_load_invalid_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fw-pack.toml");
        std::fs::write(&path, "[firmware\n").unwrap();

        let err = PackConfig::load(&path).unwrap_err();
        assert!(matches!(err, PackError::Config { .. }));
        assert!(err.to_string().contains("fw-pack.toml"));
    }

    #[test]
    fn test_discover_explicit_missing_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(PackConfig::discover(Some(&path)).is_err());
    }
}
