use crate::{Extent, color::LinearColor};

/// A resolved image of linear `RGBA` float pixels, rows from the top.
#[derive(Clone, Debug, PartialEq)]
pub struct HdrImage {
    /// The image extent.
    pub extent: Extent,

    /// The pixels.
    pub pixels: Box<[LinearColor]>,
}

impl HdrImage {
    /// Creates a new image.
    ///
    /// # Panics
    /// If the pixel count doesn't match the extent.
    pub fn new(extent: Extent, pixels: Box<[LinearColor]>) -> Self {
        assert_eq!(
            pixels.len(),
            extent.pixel_count(),
            "HDR image pixel count must match its extent"
        );

        Self { extent, pixels }
    }

    /// The pixel at a position.
    pub fn pixel(&self, x: u32, y: u32) -> LinearColor {
        self.pixels[y as usize * self.extent.width as usize + x as usize]
    }

    /// The image as a flat slice of channels.
    pub fn as_channels(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// The brightest colour channel in the image, ignoring alpha.
    pub fn maximum(&self) -> f32 {
        self.pixels
            .iter()
            .flat_map(|pixel| &pixel[..3])
            .copied()
            .filter(|value| !value.is_nan())
            .fold(0.0, f32::max)
    }
}
