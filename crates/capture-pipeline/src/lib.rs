//! # Capture Pipeline
//! Captures a camera's view to a PNG file.
//!
//! [`capture_view`] renders the camera into an HDR offscreen target sized to the host's
//! viewport, converts the linear result to 8-bit sRGB, then writes a PNG named from a template.
//!

#![warn(missing_docs)]

use std::{io, path::PathBuf};

use render_device::{DeviceError, Extent};
use thiserror::Error;

pub use capture::{CaptureOutput, CaptureRequest, capture_view, render_display_image};
pub use environment::Environment;
pub use file_name::{Placeholder, TemplateContext, resolve_file_name};
pub use output::{encode_png, ensure_directory, output_path, write_png};

mod capture;
mod environment;
mod file_name;
mod output;

/// Capture error variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CaptureError {
    /// There is no camera to capture.
    #[error("No active camera found in the scene")]
    NoCamera,

    /// The camera is not active in its hierarchy.
    #[error("Selected camera '{camera}' is inactive")]
    InactiveCamera {
        /// The camera name.
        camera: String,
    },

    /// The host reported an empty viewport.
    #[error("Viewport resolution {0} is not a valid capture size")]
    InvalidResolution(Extent),

    /// The render device rejected an operation.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// The output directory could not be created.
    #[error("Could not create the output directory '{}':\n{source}", path.display())]
    CreateDirectory {
        /// The directory.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The image could not be encoded.
    #[error("Could not encode the capture as PNG:\n{0}")]
    Encode(#[from] image::ImageError),

    /// The PNG could not be written.
    #[error("Could not write '{}':\n{source}", path.display())]
    Write {
        /// The output file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

impl CaptureError {
    /// If the error is a failed precondition, these happen before anything is allocated or
    /// written.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoCamera
                | Self::InactiveCamera { .. }
                | Self::InvalidResolution(_)
                | Self::Device(DeviceError::CameraBusy { .. })
        )
    }
}
