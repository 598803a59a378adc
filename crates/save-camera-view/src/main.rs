//! # Save Camera View
//! Captures a scene camera's view to a PNG from the command line.
//!

#![allow(clippy::std_instead_of_alloc)]

use std::process::ExitCode;

use clap::Parser;
use mimalloc::MiMalloc;
use render_device::{Camera, Device};
use tracing::{info, info_span};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub use directories::config_dir;

use adapters::{capture_inspector, capture_window, failure_message, reveal};
use cli::{Cli, Command};
use failure::{Failure, Ignore, report};
use scene::Scene;
use settings::{CaptureSettings, Settings};

mod adapters;
mod cli;
mod directories;
mod failure;
#[cfg(feature = "log")]
mod logger;
mod scene;
mod settings;

/// The Cargo package version.
#[cfg(not(debug_assertions))]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The Cargo package version or '0.0.0' if a non-release build.
#[cfg(debug_assertions)]
pub const VERSION: &str = "0.0.0";

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logger
    #[cfg(feature = "log")]
    let _logger_guards =
        logger::setup_logger(cli.debug).report_and_panic("Could not set up the logger");

    let _span = info_span!("[Main]").entered();
    info!("Save Camera View v{}", VERSION);

    // Load scene
    let scene = match &cli.scene {
        Some(path) => Scene::load(path),
        None => Scene::demo(),
    };
    let Some(scene) = scene.report("Could not load the scene") else {
        return ExitCode::FAILURE;
    };

    // Load settings
    let settings_path = cli.settings.clone().unwrap_or_else(Settings::file_path);
    let Some(mut settings) =
        Settings::load_or_create(&settings_path).report("Could not load the settings file")
    else {
        return ExitCode::FAILURE;
    };

    let device = Device::default();

    let result = match &cli.command {
        Command::Window { overrides } => {
            if overrides.apply(&mut settings.window) {
                settings
                    .save(&settings_path)
                    .report("Could not save the settings file")
                    .ignore();
            }

            capture_window(&device, &scene, &settings.window)
        }

        Command::Inspector { camera, overrides } => {
            let Some(camera) = scene.camera(camera) else {
                report(
                    format!("'{camera}' is not a camera in '{}'", scene.name),
                    "Could not find the camera",
                );
                return ExitCode::FAILURE;
            };

            let is_new = !settings.cameras.contains_key(camera.name());
            let camera_settings = settings
                .cameras
                .entry(camera.name().to_string())
                .or_insert_with(CaptureSettings::inspector);

            if overrides.apply(camera_settings) || is_new {
                settings
                    .save(&settings_path)
                    .report("Could not save the settings file")
                    .ignore();
            }

            capture_inspector(&device, &scene, &camera, &settings.camera(camera.name()))
        }

        Command::Reveal { camera } => {
            let capture_settings = match camera {
                Some(camera) => settings.camera(camera),
                None => settings.window.clone(),
            };

            reveal(&scene, &capture_settings);
            return ExitCode::SUCCESS;
        }
    };

    match result {
        Ok(output) => {
            println!("Saved {}", output.path.display());
            ExitCode::SUCCESS
        }

        Err(error) => {
            report(&error, failure_message(&error));
            ExitCode::FAILURE
        }
    }
}
