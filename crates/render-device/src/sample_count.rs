/// Multi-sample anti-aliasing setting for a target.
///
/// The discriminant is the sample count a user selects, `0` meaning MSAA is disabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SampleCount {
    /// One sample per pixel.
    #[default]
    Disabled,

    /// Two samples per pixel.
    X2,

    /// Four samples per pixel.
    X4,

    /// Eight samples per pixel.
    X8,
}

// Sample positions within a pixel, [0, 1) from the top left corner. These are the standard
// D3D/Vulkan patterns expressed in sixteenths around the pixel centre.
const POSITIONS_1: [[f32; 2]; 1] = [[0.5, 0.5]];
const POSITIONS_2: [[f32; 2]; 2] = [[0.75, 0.75], [0.25, 0.25]];
const POSITIONS_4: [[f32; 2]; 4] = [
    [0.375, 0.125],
    [0.875, 0.375],
    [0.125, 0.625],
    [0.625, 0.875],
];
const POSITIONS_8: [[f32; 2]; 8] = [
    [0.5625, 0.3125],
    [0.4375, 0.6875],
    [0.8125, 0.5625],
    [0.3125, 0.1875],
    [0.1875, 0.8125],
    [0.0625, 0.4375],
    [0.6875, 0.9375],
    [0.9375, 0.0625],
];

impl SampleCount {
    /// Every selectable sample count, in ascending order.
    pub const ALL: [Self; 4] = [Self::Disabled, Self::X2, Self::X4, Self::X8];

    /// Parses a user facing sample count. Only `0`, `2`, `4` and `8` are valid.
    pub const fn from_count(count: u32) -> Option<Self> {
        match count {
            0 => Some(Self::Disabled),
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            8 => Some(Self::X8),
            _ => None,
        }
    }

    /// The user facing sample count, `0` when disabled.
    pub const fn count(self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }

    /// The number of samples stored for each pixel.
    pub const fn samples_per_pixel(self) -> usize {
        match self {
            Self::Disabled => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }

    /// Sample positions relative to the top left corner of a pixel.
    pub fn positions(self) -> &'static [[f32; 2]] {
        match self {
            Self::Disabled => &POSITIONS_1,
            Self::X2 => &POSITIONS_2,
            Self::X4 => &POSITIONS_4,
            Self::X8 => &POSITIONS_8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SampleCount;

    #[test]
    fn count_round_trips_through_from_count() {
        for samples in SampleCount::ALL {
            assert_eq!(SampleCount::from_count(samples.count()), Some(samples));
        }

        assert_eq!(SampleCount::from_count(1), None);
        assert_eq!(SampleCount::from_count(16), None);
    }

    #[test]
    fn positions_are_inside_the_pixel() {
        for samples in SampleCount::ALL {
            let positions = samples.positions();
            assert_eq!(positions.len(), samples.samples_per_pixel());

            for [x, y] in positions {
                assert!((0.0..1.0).contains(x));
                assert!((0.0..1.0).contains(y));
            }
        }
    }
}
