use crate::Extent;

/// A resolved image of 8-bit sRGB encoded `RGBA` pixels, rows from the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SdrImage {
    /// The image extent.
    pub extent: Extent,

    /// The pixels.
    pub pixels: Box<[[u8; 4]]>,
}

impl SdrImage {
    /// Creates a new image.
    ///
    /// # Panics
    /// If the pixel count doesn't match the extent.
    pub fn new(extent: Extent, pixels: Box<[[u8; 4]]>) -> Self {
        assert_eq!(
            pixels.len(),
            extent.pixel_count(),
            "SDR image pixel count must match its extent"
        );

        Self { extent, pixels }
    }

    /// The pixel at a position.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[y as usize * self.extent.width as usize + x as usize]
    }

    /// The image as tightly packed `RGBA8` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
