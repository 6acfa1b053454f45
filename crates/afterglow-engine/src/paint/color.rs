use glam::Vec3;

/// Error returned when parsing a `#rrggbb` color literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color literal {0:?} must start with '#'")]
    MissingHash(String),
    #[error("color literal {0:?} must have exactly 6 hex digits")]
    BadLength(String),
    #[error("color literal {0:?} contains a non-hex digit")]
    BadDigit(String),
}

/// Premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Shader parameters take straight RGB through [`Color::rgb`]; clear colors
/// go to wgpu through [`Color::to_wgpu`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    /// Creates an opaque color from straight sRGB bytes (`0..=255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parses an opaque `#rrggbb` literal, as used by the glow defaults and
    /// the debug panel's color bindings.
    pub fn from_hex(literal: &str) -> Result<Self, ColorParseError> {
        let digits = literal
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(literal.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(literal.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| ColorParseError::BadDigit(literal.to_string()))
        };

        Ok(Self::from_srgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats the straight RGB channels as `#rrggbb`.
    pub fn to_hex(self) -> String {
        let rgb = self.rgb();
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(rgb.x), byte(rgb.y), byte(rgb.z))
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Creates an opaque color from a straight RGB vector.
    #[inline]
    pub fn from_rgb(rgb: Vec3) -> Self {
        Self::from_straight(rgb.x, rgb.y, rgb.z, 1.0)
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Straight RGB channels.
    #[inline]
    pub fn rgb(self) -> Vec3 {
        let (r, g, b, _) = self.to_straight();
        Vec3::new(r, g, b)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}
