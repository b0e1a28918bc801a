use crate::foundation::core::Rgb;

/// Bit offset of the red channel in a packed light value.
pub const RED_SHIFT: u32 = 16;
/// Bit offset of the green channel in a packed light value.
pub const GREEN_SHIFT: u32 = 8;
/// Bit offset of the blue channel in a packed light value.
pub const BLUE_SHIFT: u32 = 0;

/// One packed 24-bit color per node, as produced by a pattern runtime for a frame.
///
/// Layout per value: bits 16..23 red, 8..15 green, 0..7 blue. Bits above 23 are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedLightState(Vec<u32>);

impl PackedLightState {
    /// Wrap an already-packed buffer.
    pub fn new(values: Vec<u32>) -> Self {
        Self(values)
    }

    /// Number of node values in the buffer.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the buffer holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw packed values.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Take ownership of the raw packed values.
    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl From<Vec<u32>> for PackedLightState {
    fn from(values: Vec<u32>) -> Self {
        Self(values)
    }
}

fn channel(packed: u32, shift: u32) -> f32 {
    ((packed >> shift) & 0xff) as f32 / 255.0
}

/// Decode a single packed value into a normalized triple.
pub fn decode_packed(packed: u32) -> Rgb {
    Rgb {
        r: channel(packed, RED_SHIFT),
        g: channel(packed, GREEN_SHIFT),
        b: channel(packed, BLUE_SHIFT),
    }
}

/// Decode a whole frame buffer. The output has exactly one triple per input value;
/// length checks against the node registry are the caller's job.
pub fn decode_frame(packed: &[u32]) -> Vec<Rgb> {
    packed.iter().copied().map(decode_packed).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/color/packed.rs"]
mod tests;
