//! Math utilities and types
//!
//! Provides the small set of vector types and scalar helpers the layout and widget code needs.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type (positions, extents, pointer coordinates)
pub type Vec2 = Vector2<f32>;

/// 4D vector type (RGBA colors)
pub type Vec4 = Vector4<f32>;

/// Linearly remap `value` from the range `[start_a, end_a]` into `[start_b, end_b]`.
///
/// The result is not clamped. A degenerate source range (`start_a == end_a`) maps every
/// input onto `start_b` instead of dividing by zero.
pub fn remap(value: f32, start_a: f32, end_a: f32, start_b: f32, end_b: f32) -> f32 {
    let span = end_a - start_a;
    if span == 0.0 {
        return start_b;
    }
    start_b + (value - start_a) * (end_b - start_b) / span
}

/// Parse a `#rrggbb` or `#rrggbbaa` hex string into a normalized RGBA color.
pub fn hex_to_vec4(hex: &str) -> Option<Vec4> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 && digits.len() != 8 {
        return None;
    }

    let channel = |i: usize| -> Option<f32> {
        let byte = u8::from_str_radix(digits.get(i * 2..i * 2 + 2)?, 16).ok()?;
        Some(f32::from(byte) / 255.0)
    };

    let alpha = if digits.len() == 8 { channel(3)? } else { 1.0 };
    Some(Vec4::new(channel(0)?, channel(1)?, channel(2)?, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_remap_basic() {
        assert_relative_eq!(remap(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
        assert_relative_eq!(remap(0.25, 0.0, 1.0, 100.0, 200.0), 125.0);
        // Not clamped
        assert_relative_eq!(remap(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
    }

    #[test]
    fn test_remap_degenerate_range() {
        assert_relative_eq!(remap(3.0, 4.0, 4.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_hex_to_vec4() {
        let c = hex_to_vec4("#ff000080").unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 0.0);
        assert_relative_eq!(c.w, 128.0 / 255.0);

        let opaque = hex_to_vec4("00ff00").unwrap();
        assert_relative_eq!(opaque.w, 1.0);

        assert!(hex_to_vec4("#12345").is_none());
        assert!(hex_to_vec4("#zz0000").is_none());
    }
}
