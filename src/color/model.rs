use crate::color::packed::{BLUE_SHIFT, GREEN_SHIFT, RED_SHIFT, decode_packed};
use crate::foundation::core::Rgb;
use crate::foundation::error::{TreevisError, TreevisResult};

/// 8-bit RGB color as manipulated by pattern code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red, 0-255.
    pub r: u8,
    /// Green, 0-255.
    pub g: u8,
    /// Blue, 0-255.
    pub b: u8,
}

impl Color {
    /// All channels off.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// All channels full.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Warm orange.
    pub const ORANGE: Self = Self::rgb(252, 81, 8);
    /// Amber.
    pub const AMBER: Self = Self::rgb(251, 136, 10);
    /// Warm yellow.
    pub const YELLOW: Self = Self::rgb(234, 163, 8);
    /// Teal.
    pub const TEAL: Self = Self::rgb(23, 175, 150);
    /// Cyan.
    pub const CYAN: Self = Self::rgb(21, 170, 210);
    /// Violet.
    pub const VIOLET: Self = Self::rgb(122, 47, 255);
    /// Pink.
    pub const PINK: Self = Self::rgb(240, 15, 137);

    /// Build a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`.
    pub fn from_hex(s: &str) -> TreevisResult<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| TreevisError::validation(format!("hex color '{s}' must start with '#'")))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(TreevisError::validation(format!(
                "hex color '{s}' must have exactly 6 hex digits"
            )));
        }
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|e| TreevisError::validation(format!("hex color '{s}': {e}")))?;
        Ok(Self::from_packed(packed))
    }

    /// Build a color from hue, saturation and value, each in `[0, 1]`.
    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        let (r, g, b) = hsv_to_rgb(h, s.clamp(0.0, 1.0), v.clamp(0.0, 1.0));
        Self::rgb(to_u8(r * 255.0), to_u8(g * 255.0), to_u8(b * 255.0))
    }

    /// Unpack from the light-state layout; bits above 23 are ignored.
    pub fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> RED_SHIFT) & 0xff) as u8,
            g: ((packed >> GREEN_SHIFT) & 0xff) as u8,
            b: ((packed >> BLUE_SHIFT) & 0xff) as u8,
        }
    }

    /// Pack into the light-state layout.
    pub fn to_packed(self) -> u32 {
        (u32::from(self.r) << RED_SHIFT)
            | (u32::from(self.g) << GREEN_SHIFT)
            | (u32::from(self.b) << BLUE_SHIFT)
    }

    /// Normalized triple, as the renderer sees it.
    pub fn to_rgb(self) -> Rgb {
        decode_packed(self.to_packed())
    }

    /// `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Divide every channel by `n`. Larger `n` fades faster; `n < 1` brightens up to white.
    /// Non-positive or non-finite `n` leaves the color unchanged.
    pub fn fade(self, n: f64) -> Self {
        if !n.is_finite() || n <= 0.0 {
            return self;
        }
        let f = |c: u8| to_u8(f64::from(c) / n);
        Self::rgb(f(self.r), f(self.g), f(self.b))
    }

    /// Linear blend toward `target`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, target: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let f = |a: u8, b: u8| to_u8(f64::from(a) * (1.0 - t) + f64::from(b) * t);
        Self::rgb(f(self.r, target.r), f(self.g, target.g), f(self.b, target.b))
    }
}

fn to_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/model.rs"]
mod tests;
