use tracing::debug;
use utilities::DebugTime;

use crate::{Device, DeviceError, HdrImage, OffscreenTarget, SampleCount, SdrImage, TargetFormat};

/// Converts a linear HDR image into an 8-bit sRGB image the same way a GPU blit into an sRGB
/// render target would.
///
/// The image is copied into a temporary `Rgba8Srgb` target, where the format change clamps,
/// encodes and quantizes every colour channel, then read back. The temporary target is released
/// before returning.
pub struct SrgbBlit<'device> {
    device: &'device Device,
}

impl<'device> SrgbBlit<'device> {
    /// Creates a new blit for a device.
    pub fn new(device: &'device Device) -> Self {
        Self { device }
    }

    /// Runs the blit over an image.
    pub fn run(&self, hdr_image: &HdrImage) -> Result<SdrImage, DeviceError> {
        let _timing = DebugTime::start("sRGB blit");

        debug!(
            "Blitting {} image with maximum {:.2}",
            hdr_image.extent,
            hdr_image.maximum()
        );

        let mut target = OffscreenTarget::new(
            self.device,
            hdr_image.extent,
            TargetFormat::Rgba8Srgb,
            SampleCount::Disabled,
            "sRGB Blit Output",
        )?;

        target.copy_from(hdr_image)?;

        let _active = self.device.make_active(&target);
        target.read_bytes()
    }
}
