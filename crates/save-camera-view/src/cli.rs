//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use render_device::SampleCount;

use crate::settings::{CaptureSettings, MultiSample};

/// Camera view capture tool
#[derive(Parser, Debug)]
#[command(name = "save-camera-view")]
#[command(version, about = "Captures a camera's view of a scene to a PNG", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Scene description to capture (default: the bundled demo scene)
    #[arg(long, global = true)]
    pub scene: Option<PathBuf>,

    /// Settings file path
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture the scene's main camera
    Window {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Capture a camera using its own settings
    Inspector {
        /// Name of the camera to capture
        #[arg(long)]
        camera: String,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Print the output directory and whether it exists
    Reveal {
        /// Show a camera's directory instead of the window's
        #[arg(long)]
        camera: Option<String>,
    },
}

/// Settings changed from the command line, saved for future captures.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Output directory
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// File name template using {scene} {camera} {samples} {date} {time}
    #[arg(long)]
    pub name: Option<String>,

    /// MSAA sample count: 0, 2, 4 or 8
    #[arg(long, value_parser = parse_samples)]
    pub samples: Option<SampleCount>,
}

impl Overrides {
    /// Applies the overrides, returns if anything changed.
    pub fn apply(&self, settings: &mut CaptureSettings) -> bool {
        let before = settings.clone();

        if let Some(directory) = &self.directory {
            settings.directory = Some(directory.clone());
        }

        if let Some(name) = &self.name {
            settings.file_name.clone_from(name);
        }

        if let Some(samples) = self.samples {
            settings.samples = MultiSample(samples);
        }

        *settings != before
    }
}

fn parse_samples(value: &str) -> Result<SampleCount, String> {
    let count: u32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;

    SampleCount::from_count(count).ok_or_else(|| format!("{count} must be one of 0, 2, 4 or 8"))
}
