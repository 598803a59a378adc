//! # Render Device
//! The offscreen rendering device used to capture camera views.
//!
//! A [`Device`] owns the bookkeeping a GPU driver would: which targets are alive, which camera
//! renders into which target, and which target is the active read surface. Cameras draw through
//! a [`Frame`], and targets are read back into an [`HdrImage`] or, after an [`SrgbBlit`], an
//! [`SdrImage`].
//!

#![warn(missing_docs)]

extern crate alloc;

pub use camera::Camera;
pub use device::{ActiveSurface, CameraBinding, Device, DeviceCapabilities, ResourceId};
pub use extent::Extent;
pub use frame::{Frame, Rect, Triangle, Vertex};
pub use hdr_image::HdrImage;
pub use sample_count::SampleCount;
pub use sdr_image::SdrImage;
pub use srgb_blit::SrgbBlit;
pub use target::{OffscreenTarget, TargetFormat};

use thiserror::Error;

pub mod color;

mod camera;
mod device;
mod extent;
mod frame;
mod hdr_image;
mod sample_count;
mod sdr_image;
mod srgb_blit;
mod target;

/// Device error variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// A target was requested with a zero width or height.
    #[error("Target extent must be non-zero, got {0}")]
    ZeroExtent(Extent),

    /// A target was requested larger than the device supports.
    #[error("Target extent {extent} exceeds the device maximum dimension of {maximum}")]
    ExtentTooLarge {
        /// The requested extent.
        extent: Extent,
        /// The largest supported width or height.
        maximum: u32,
    },

    /// The camera already renders into another target.
    #[error("Camera '{camera}' is already bound to target {target}")]
    CameraBusy {
        /// The camera name.
        camera: String,
        /// The target the camera is bound to.
        target: ResourceId,
    },

    /// A render was issued to a target the camera is not bound to.
    #[error("Target {target} is not bound to camera '{camera}'")]
    NotBound {
        /// The camera name.
        camera: String,
        /// The target that was rendered to.
        target: ResourceId,
    },

    /// A read or write used a target of the wrong format.
    #[error("Target '{label}' has format {actual:?}, expected {expected:?}")]
    FormatMismatch {
        /// The target label.
        label: String,
        /// The format the operation requires.
        expected: TargetFormat,
        /// The format of the target.
        actual: TargetFormat,
    },

    /// A blit between images of different sizes.
    #[error("Blit input extent {input} does not match output extent {output}")]
    ExtentMismatch {
        /// The extent of the image being copied.
        input: Extent,
        /// The extent of the target being written.
        output: Extent,
    },
}
