//! Conversions between linear light and the sRGB transfer function.
//!
//! HDR targets store linear values that may exceed `1.0`. PNG output expects sRGB encoded
//! 8-bit values, so colour channels are clamped to `[0, 1]`, encoded, then quantized. Alpha is
//! never gamma encoded.

/// A linear RGBA colour.
pub type LinearColor = [f32; 4];

/// Encodes a linear value with the sRGB transfer function.
///
/// Input is clamped to `[0, 1]`, `NaN` maps to `0`.
pub fn linear_to_srgb(value: f32) -> f32 {
    let value = saturate(value);

    if value <= 0.003_130_8 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Decodes an sRGB encoded value back to linear light.
pub fn srgb_to_linear(value: f32) -> f32 {
    let value = saturate(value);

    if value <= 0.040_45 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Quantizes a `[0, 1]` value to an 8-bit unsigned normalized code, rounding to nearest.
pub fn encode_unorm8(value: f32) -> u8 {
    (saturate(value) * 255.0).round() as u8
}

/// Expands an 8-bit unsigned normalized code to `[0, 1]`.
pub fn decode_unorm8(code: u8) -> f32 {
    f32::from(code) / 255.0
}

/// Encodes a linear colour into 8-bit sRGB, alpha stays linear.
pub fn encode_srgb8(color: LinearColor) -> [u8; 4] {
    [
        encode_unorm8(linear_to_srgb(color[0])),
        encode_unorm8(linear_to_srgb(color[1])),
        encode_unorm8(linear_to_srgb(color[2])),
        encode_unorm8(color[3]),
    ]
}

/// Decodes an 8-bit sRGB colour to linear, alpha stays linear.
pub fn decode_srgb8(code: [u8; 4]) -> LinearColor {
    [
        srgb_to_linear(decode_unorm8(code[0])),
        srgb_to_linear(decode_unorm8(code[1])),
        srgb_to_linear(decode_unorm8(code[2])),
        decode_unorm8(code[3]),
    ]
}

fn saturate(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }

    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_function_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_srgb(-3.0), 0.0);
        assert!((linear_to_srgb(12.5) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_srgb(f32::NAN), 0.0);
    }

    #[test]
    fn mid_grey_encodes_to_188() {
        // 0.5 linear is the classic 188/255 sRGB value.
        assert_eq!(encode_unorm8(linear_to_srgb(0.5)), 188);
        assert_eq!(encode_unorm8(linear_to_srgb(0.215_860_5)), 128);
    }

    #[test]
    fn every_code_survives_decode_then_encode() {
        for code in 0..=u8::MAX {
            let linear = srgb_to_linear(decode_unorm8(code));
            assert_eq!(encode_unorm8(linear_to_srgb(linear)), code);
        }
    }

    #[test]
    fn alpha_is_not_gamma_encoded() {
        let encoded = encode_srgb8([0.5, 0.5, 0.5, 0.5]);
        assert_eq!(encoded, [188, 188, 188, 128]);
    }
}
