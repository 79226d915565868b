// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand, ValueEnum};
use shutter::app::AppModel;
use shutter::backends::camera::types::{CameraBackendType, Facing};
use shutter::flash::FlashMode;
use shutter::i18n;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "shutter")]
#[command(about = "Photo capture application for the COSMIC desktop")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Use the built-in test pattern instead of real cameras
    #[arg(long, global = true)]
    synthetic: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Take a photo
    Photo {
        /// Which camera to use
        #[arg(short, long, value_enum, default_value_t = FacingArg::Back)]
        facing: FacingArg,

        /// Fire the flash LED (back camera only)
        #[arg(long)]
        flash: bool,

        /// Output file path (default: ~/Pictures/shutter/IMG_TIMESTAMP_ID.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FacingArg {
    Front,
    Back,
}

impl From<FacingArg> for Facing {
    fn from(arg: FacingArg) -> Self {
        match arg {
            FacingArg::Front => Facing::Front,
            FacingArg::Back => Facing::Back,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=shutter=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let backend = if cli.synthetic {
        CameraBackendType::Synthetic
    } else {
        CameraBackendType::GStreamer
    };

    match cli.command {
        Some(Commands::List) => Ok(cli::list_cameras(backend)?),
        Some(Commands::Photo {
            facing,
            flash,
            output,
        }) => {
            let flash = if flash { FlashMode::On } else { FlashMode::Off };
            Ok(cli::take_photo(backend, facing.into(), flash, output)?)
        }
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(360.0)
            .min_height(480.0),
    );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
