//! Build layout for the ha_switch firmware.
//!
//! This module defines the `BuildLayout` struct which serves as the single source of truth
//! for the paths, symbol names and naming conventions shared between the coprocessor
//! packer and the main firmware build.
//!
//! # Example
//!
//! ```
//! use ha_switch_shared::HA_SWITCH_LAYOUT;
//!
//! assert_eq!(HA_SWITCH_LAYOUT.header_guard, "_COP_H_");
//! assert_eq!(HA_SWITCH_LAYOUT.default_version, "0.0.1");
//! ```

/// Build layout specification for a firmware project.
///
/// Each firmware project has its own static `BuildLayout` instance.
#[derive(Debug, Clone, Copy)]
pub struct BuildLayout {
    /// Compiled coprocessor firmware, relative to the main project directory
    pub firmware_input: &'static str,

    /// Generated header, relative to the main project directory
    pub header_output: &'static str,

    /// Include guard of the generated header
    pub header_guard: &'static str,

    /// Name of the `const uint8_t[]` holding the compressed firmware
    pub array_name: &'static str,

    /// Array entries per line in the generated header
    pub bytes_per_line: usize,

    /// Environment variable carrying the release version
    pub version_env: &'static str,

    /// Version used when `version_env` is unset or empty.
    /// Desktop-side version checks expect a parseable triple.
    pub default_version: &'static str,

    /// Preprocessor define receiving the version string
    pub version_define: &'static str,

    /// Environment variable carrying the board identifier
    pub board_env: &'static str,

    /// Output program name prefix, followed by the board identifier
    pub prog_name_prefix: &'static str,
}

impl BuildLayout {
    /// Create a new build layout specification.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        firmware_input: &'static str,
        header_output: &'static str,
        header_guard: &'static str,
        array_name: &'static str,
        bytes_per_line: usize,
        version_env: &'static str,
        default_version: &'static str,
        version_define: &'static str,
        board_env: &'static str,
        prog_name_prefix: &'static str,
    ) -> Self {
        Self {
            firmware_input,
            header_output,
            header_guard,
            array_name,
            bytes_per_line,
            version_env,
            default_version,
            version_define,
            board_env,
            prog_name_prefix,
        }
    }
}

/// ha_switch ESP32 build layout.
///
/// The dimmer coprocessor (ATtiny) is built by its own PlatformIO project next to
/// the ESP32 one; its image is embedded into the ESP32 firmware as a raw deflate stream.
pub const HA_SWITCH_LAYOUT: BuildLayout = BuildLayout::new(
    "../dimmer-coprocessor/.pio/build/tiny_dimmer/firmware.hex",
    "./src/coprocessor.h",
    "_COP_H_",
    "COPROCESSOR_FIRMWARE",
    12,
    "VERSION",
    "0.0.1",
    "BUILD_VERSION",
    "PIOENV",
    "ha_switch_",
);
