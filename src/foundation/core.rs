use std::time::Duration;

use crate::foundation::error::{TreevisError, TreevisResult};

/// Logical frame counter. Starts at 0 each time the loop enters `Running`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The index following this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Frames per `den` seconds.
    pub num: u32,
    /// Must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> TreevisResult<Self> {
        if den == 0 {
            return Err(TreevisError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TreevisError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Minimum spacing between two logical frames.
    pub fn frame_interval(self) -> Duration {
        Duration::from_secs_f64(f64::from(self.den) / f64::from(self.num.max(1)))
    }
}

/// Position of a light node in tree space.
///
/// Coordinates follow the GIFT convention: X and Y range over `[-1, 1]`, Z runs
/// from 0 at the base to the tree height.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    /// Left (-1) to right (+1).
    pub x: f64,
    /// Back (-1) to front (+1).
    pub y: f64,
    /// Bottom (0) to top.
    pub z: f64,
}

impl Point3 {
    /// Build a point from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Angle around the trunk, measured from the +X direction.
    pub fn polar_angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Horizontal distance from the trunk (the Z axis).
    pub fn trunk_distance(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Normalized RGB triple, each channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// All channels off.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Build a triple from its channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
