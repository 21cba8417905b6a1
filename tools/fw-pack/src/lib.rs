//! fw-pack library
//!
//! Build-time helpers for the ha_switch firmware: embeds the dimmer coprocessor image as
//! a C header and computes the version define and output program name.

pub mod codegen;
pub mod config;
pub mod environment;
pub mod error;
pub mod firmware;
pub mod version;

pub use codegen::{render_header, HeaderOptions};
pub use config::PackConfig;
pub use environment::{BuildEnvironment, CppDefine};
pub use error::PackError;
pub use firmware::{
    compress, decompress, pack_firmware, CompressedPayload, PackOptions, PackReport,
};
pub use version::{normalize_version, prog_name, resolve_board, version_from_env};

use tracing::info;

/// Version and output name for one build.
///
/// Reads the version from the configured environment variable, appends it as a
/// string define and names the program after `board`.
pub fn configure_build(config: &PackConfig, board: Option<&str>) -> BuildEnvironment {
    let version = version_from_env(&config.version.env_var, &config.version.default);
    info!("Using version {} for the build", version);
    build_environment(config, &version, board)
}

/// Same as [`configure_build`] with an already normalized version
pub fn build_environment(
    config: &PackConfig,
    version: &str,
    board: Option<&str>,
) -> BuildEnvironment {
    let mut env = BuildEnvironment::new();
    env.append_define(config.version.define.as_str(), version);
    env.replace_prog_name(prog_name(&config.output.prefix, board));
    env
}
