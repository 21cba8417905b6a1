//! fw-pack - ha_switch build helper
//!
//! # Commands
//!
//! - `fw-pack firmware` - Compress the coprocessor image into `src/coprocessor.h`
//! - `fw-pack check` - Verify the header matches the current coprocessor image
//! - `fw-pack version` - Print the normalized build version
//! - `fw-pack flags` - Print `-D` build flags (for `build_flags = !fw-pack flags`)
//! - `fw-pack env` - Print defines and program name as JSON
//! - `fw-pack all` - Pack the firmware, then print the build flags
//!
//! Logs go to stderr; stdout only carries command output.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use fw_pack::{config::PackConfig, firmware, PackOptions};

#[derive(Parser)]
#[command(name = "fw-pack")]
#[command(about = "Embed the coprocessor firmware and stamp the build version")]
#[command(version)]
struct Cli {
    /// Path to fw-pack.toml (defaults to ./fw-pack.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress the coprocessor firmware into a C header
    Firmware(FirmwareArgs),

    /// Check the generated header is in sync with the firmware image
    Check(PathArgs),

    /// Print the normalized build version
    Version,

    /// Print the build version define as PlatformIO build flags
    Flags(BoardArgs),

    /// Print the build environment (defines, program name) as JSON
    Env(BoardArgs),

    /// Pack the firmware, then print the build flags
    All {
        #[command(flatten)]
        firmware: FirmwareArgs,

        #[command(flatten)]
        board: BoardArgs,
    },
}

#[derive(Args)]
struct PathArgs {
    /// Compiled coprocessor firmware (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Generated header (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct FirmwareArgs {
    #[command(flatten)]
    paths: PathArgs,

    /// Skip inflating the payload again before writing
    #[arg(long)]
    no_verify: bool,
}

#[derive(Args)]
struct BoardArgs {
    /// Board identifier used in the program name (defaults to `[output] board_env`)
    #[arg(short, long)]
    board: Option<String>,
}

impl BoardArgs {
    fn resolve(self, config: &PackConfig) -> Option<String> {
        fw_pack::resolve_board(self.board, &config.output.board_env)
    }
}

fn pack_options(config: &PackConfig, verify: bool) -> PackOptions {
    PackOptions {
        header: config.firmware.header_options(),
        verify,
    }
}

fn resolve_paths(config: &PackConfig, args: PathArgs) -> (PathBuf, PathBuf) {
    (
        args.input.unwrap_or_else(|| config.firmware.input.clone()),
        args.output.unwrap_or_else(|| config.firmware.output.clone()),
    )
}

fn pack(config: &PackConfig, args: FirmwareArgs) -> Result<()> {
    let (input, output) = resolve_paths(config, args.paths);
    firmware::pack_firmware(&input, &output, &pack_options(config, !args.no_verify))
        .with_context(|| format!("Failed to pack {}", input.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = PackConfig::discover(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Firmware(args) => pack(&config, args)?,

        Commands::Check(args) => {
            let (input, output) = resolve_paths(&config, args);
            let in_sync = firmware::check_header(&input, &output, &pack_options(&config, true))
                .with_context(|| format!("Failed to check {}", output.display()))?;
            if !in_sync {
                anyhow::bail!(
                    "{} is out of sync. Run 'fw-pack firmware' to regenerate.",
                    output.display()
                );
            }
        }

        Commands::Version => {
            let version =
                fw_pack::version_from_env(&config.version.env_var, &config.version.default);
            println!("{}", version);
        }

        Commands::Flags(args) => {
            let board = args.resolve(&config);
            let env = fw_pack::configure_build(&config, board.as_deref());
            print!("{}", env.build_flags());
        }

        Commands::Env(args) => {
            let board = args.resolve(&config);
            let env = fw_pack::configure_build(&config, board.as_deref());
            println!("{}", env.to_json().context("Failed to serialize build environment")?);
        }

        Commands::All { firmware, board } => {
            pack(&config, firmware)?;
            let board = board.resolve(&config);
            let env = fw_pack::configure_build(&config, board.as_deref());
            print!("{}", env.build_flags());
        }
    }

    Ok(())
}
