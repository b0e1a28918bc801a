use crate::color::model::Color;
use crate::color::packed::PackedLightState;
use crate::foundation::core::Point3;
use crate::foundation::error::TreevisResult;
use crate::pattern::console::Console;
use crate::pattern::runtime::{PatternRuntime, Resume};
use crate::pattern::spin::Spin;
use crate::topology::tree::Topology;

/// Backing light state a native pattern draws into.
#[derive(Clone, Debug)]
pub struct Pixels {
    coords: Vec<Point3>,
    colors: Vec<Color>,
    height: f64,
}

impl Pixels {
    /// All-black pixels at the topology's coordinates.
    pub fn from_topology(topology: &Topology) -> Self {
        Self {
            coords: topology.coords().to_vec(),
            colors: vec![Color::BLACK; topology.len()],
            height: topology.height(),
        }
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the tree has no pixels.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Tree height (maximum Z).
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Pixel positions, in node order.
    pub fn coords(&self) -> &[Point3] {
        &self.coords
    }

    /// Current colors, in node order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Returns `false` for an out-of-range index.
    pub fn set(&mut self, index: usize, color: Color) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.colors.fill(color);
    }

    /// Coordinate/color pairs for in-place updates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Point3, &mut Color)> + '_ {
        self.coords.iter().copied().zip(self.colors.iter_mut())
    }

    /// Pack the current colors, one value per pixel.
    pub fn to_packed(&self) -> PackedLightState {
        PackedLightState::new(self.colors.iter().map(|c| c.to_packed()).collect())
    }
}

/// A pattern definition written in Rust.
pub trait Pattern {
    /// Display name.
    fn name(&self) -> &str;

    /// Start a new run of the pattern. `Ok(None)` if there is nothing to run.
    fn draw(&self, pixels: &Pixels) -> TreevisResult<Option<Box<dyn PatternStep>>>;
}

/// One in-flight run of a [`Pattern`].
pub trait PatternStep {
    /// Draw the next frame into `pixels`.
    fn step(&mut self, pixels: &mut Pixels) -> TreevisResult<Resume>;
}

impl std::fmt::Debug for dyn PatternStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternStep").finish_non_exhaustive()
    }
}

/// Runtime for patterns compiled into the binary.
pub struct NativeRuntime {
    pattern: Box<dyn Pattern>,
    pixels: Pixels,
    console: Console,
}

impl NativeRuntime {
    /// Bind `pattern` to a tree, all lights black.
    pub fn new(pattern: Box<dyn Pattern>, topology: &Topology) -> Self {
        Self {
            pattern,
            pixels: Pixels::from_topology(topology),
            console: Console::new(),
        }
    }

    /// Name of the loaded pattern.
    pub fn pattern_name(&self) -> &str {
        self.pattern.name()
    }

    /// Current backing light state.
    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// Recent lines reported on the interpreter console.
    pub fn console(&self) -> &Console {
        &self.console
    }
}

impl std::fmt::Debug for NativeRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeRuntime")
            .field("pattern", &self.pattern.name())
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

impl PatternRuntime for NativeRuntime {
    type Generator = Box<dyn PatternStep>;

    fn create(&mut self) -> TreevisResult<Option<Self::Generator>> {
        self.pattern.draw(&self.pixels)
    }

    fn resume(&mut self, generator: &mut Self::Generator) -> TreevisResult<Resume> {
        generator.step(&mut self.pixels)
    }

    fn report(&mut self, message: &str) {
        tracing::debug!(pattern = self.pattern.name(), "{message}");
        self.console.push(message);
    }

    fn take_console(&mut self) -> Vec<String> {
        self.console.drain()
    }

    fn request_frame(&mut self) -> TreevisResult<PackedLightState> {
        Ok(self.pixels.to_packed())
    }
}

/// Names accepted by [`builtin_pattern`].
pub const BUILTIN_PATTERNS: &[&str] = &["spin"];

/// Look up a pattern shipped with the crate.
pub fn builtin_pattern(name: &str) -> Option<Box<dyn Pattern>> {
    match name {
        "spin" => Some(Box::new(Spin::default())),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/native.rs"]
mod tests;
