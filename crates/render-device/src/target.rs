use half::f16;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;
use tracing::debug;

use crate::{
    Device, DeviceError, Extent, Frame, HdrImage, ResourceId, SampleCount, SdrImage,
    color::{self, LinearColor},
};

/// The pixel format of an offscreen target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// Four 32-bit float channels holding linear values.
    Rgba32Float,

    /// Four 16-bit float channels holding linear values.
    Rgba16Float,

    /// Four 8-bit channels, colour channels sRGB encoded on write.
    Rgba8Srgb,
}

enum Storage {
    Float(Vec<LinearColor>),
    Unorm8(Vec<[u8; 4]>),
}

/// An offscreen colour and depth target.
///
/// Samples are stored pixel-major, `samples_per_pixel` consecutive entries per pixel, rows from
/// the top. The target is released from the device when dropped.
pub struct OffscreenTarget<'device> {
    device: &'device Device,
    id: ResourceId,
    label: String,
    extent: Extent,
    format: TargetFormat,
    samples: SampleCount,
    color: Storage,
    depth: Vec<f32>,
}

impl<'device> OffscreenTarget<'device> {
    /// Allocates a new target. Colour starts as transparent black, depth as `1.0`.
    pub fn new(
        device: &'device Device,
        extent: Extent,
        format: TargetFormat,
        samples: SampleCount,
        label: &str,
    ) -> Result<Self, DeviceError> {
        if extent.is_empty() {
            return Err(DeviceError::ZeroExtent(extent));
        }

        let maximum = device.capabilities().max_dimension;
        if extent.width > maximum || extent.height > maximum {
            return Err(DeviceError::ExtentTooLarge { extent, maximum });
        }

        let sample_total = extent.pixel_count() * samples.samples_per_pixel();
        let color = match format {
            TargetFormat::Rgba32Float | TargetFormat::Rgba16Float => {
                Storage::Float(vec![[0.0; 4]; sample_total])
            }
            TargetFormat::Rgba8Srgb => Storage::Unorm8(vec![[0; 4]; sample_total]),
        };

        let id = device.allocate(label);
        debug!("Allocated {label} {id}: {extent} {format:?} {samples:?}");

        Ok(Self {
            device,
            id,
            label: label.to_string(),
            extent,
            format,
            samples,
            color,
            depth: vec![1.0; sample_total],
        })
    }

    /// The device resource id.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// The debug label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The target extent.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The target format.
    pub fn format(&self) -> TargetFormat {
        self.format
    }

    /// The number of samples per pixel.
    pub fn samples(&self) -> SampleCount {
        self.samples
    }

    /// Start drawing to the target.
    pub fn frame(&mut self) -> Frame<'_, 'device> {
        Frame::new(self)
    }

    /// Resolves the samples of an HDR target into a linear image.
    pub fn read_pixels(&self) -> Result<HdrImage, DeviceError> {
        let Storage::Float(data) = &self.color else {
            return Err(self.format_mismatch(TargetFormat::Rgba32Float));
        };

        let samples_per_pixel = self.samples.samples_per_pixel();
        let pixels = data.chunks_exact(samples_per_pixel).map(average).collect();

        Ok(HdrImage::new(self.extent, pixels))
    }

    /// Resolves the samples of an 8-bit target into an sRGB encoded image.
    pub fn read_bytes(&self) -> Result<SdrImage, DeviceError> {
        let Storage::Unorm8(data) = &self.color else {
            return Err(self.format_mismatch(TargetFormat::Rgba8Srgb));
        };

        let samples_per_pixel = self.samples.samples_per_pixel();
        let pixels = if samples_per_pixel == 1 {
            data.clone().into_boxed_slice()
        } else {
            // Resolve in linear light, then encode again.
            data.chunks_exact(samples_per_pixel)
                .map(|samples| {
                    let linear: Vec<LinearColor> =
                        samples.iter().copied().map(color::decode_srgb8).collect();
                    color::encode_srgb8(average(&linear))
                })
                .collect()
        };

        Ok(SdrImage::new(self.extent, pixels))
    }

    /// Copies every pixel of a linear image into every sample of this target, converting to the
    /// target format.
    pub(crate) fn copy_from(&mut self, image: &HdrImage) -> Result<(), DeviceError> {
        if image.extent != self.extent {
            return Err(DeviceError::ExtentMismatch {
                input: image.extent,
                output: self.extent,
            });
        }

        let samples_per_pixel = self.samples.samples_per_pixel();
        let format = self.format;

        match &mut self.color {
            Storage::Float(data) => data
                .par_chunks_mut(samples_per_pixel)
                .zip(image.pixels.par_iter())
                .for_each(|(samples, pixel)| samples.fill(store_float(format, *pixel))),

            Storage::Unorm8(data) => data
                .par_chunks_mut(samples_per_pixel)
                .zip(image.pixels.par_iter())
                .for_each(|(samples, pixel)| samples.fill(color::encode_srgb8(*pixel))),
        }

        Ok(())
    }

    pub(crate) fn clear(&mut self, value: LinearColor) {
        let format = self.format;

        match &mut self.color {
            Storage::Float(data) => data.fill(store_float(format, value)),
            Storage::Unorm8(data) => data.fill(color::encode_srgb8(value)),
        }

        self.depth.fill(1.0);
    }

    /// Depth tests and writes a single sample, returns if the sample was written.
    pub(crate) fn write_sample(&mut self, index: usize, depth: f32, value: LinearColor) -> bool {
        if depth >= self.depth[index] {
            return false;
        }

        self.depth[index] = depth;

        let format = self.format;
        match &mut self.color {
            Storage::Float(data) => data[index] = store_float(format, value),
            Storage::Unorm8(data) => data[index] = color::encode_srgb8(value),
        }

        true
    }

    fn format_mismatch(&self, expected: TargetFormat) -> DeviceError {
        DeviceError::FormatMismatch {
            label: self.label.clone(),
            expected,
            actual: self.format,
        }
    }
}

impl Drop for OffscreenTarget<'_> {
    fn drop(&mut self) {
        self.device.release(self.id);
        debug!("Released {} {}", self.label, self.id);
    }
}

fn store_float(format: TargetFormat, value: LinearColor) -> LinearColor {
    match format {
        TargetFormat::Rgba16Float => value.map(|channel| f16::from_f32(channel).to_f32()),
        _ => value,
    }
}

fn average(samples: &[LinearColor]) -> LinearColor {
    if let [single] = samples {
        return *single;
    }

    let mut sum = [0.0f32; 4];
    for sample in samples {
        for (total, channel) in sum.iter_mut().zip(sample) {
            *total += channel;
        }
    }

    let count = samples.len() as f32;
    sum.map(|total| total / count)
}
