use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::color::model::Color;
use crate::foundation::error::TreevisResult;
use crate::pattern::native::{Pattern, PatternStep, Pixels};
use crate::pattern::runtime::Resume;

/// A plane rotating through the tree, splitting it into two colors.
#[derive(Clone, Debug)]
pub struct Spin {
    /// Radians per frame.
    pub speed: f64,
    /// Color on the leading side of the plane.
    pub color1: Color,
    /// Color on the trailing side of the plane.
    pub color2: Color,
}

impl Default for Spin {
    fn default() -> Self {
        Self {
            speed: 0.3,
            color1: Color::rgb(0, 50, 50),
            color2: Color::rgb(50, 50, 0),
        }
    }
}

impl Pattern for Spin {
    fn name(&self) -> &str {
        "spin"
    }

    fn draw(&self, pixels: &Pixels) -> TreevisResult<Option<Box<dyn PatternStep>>> {
        Ok(Some(Box::new(SpinStep {
            spin: self.clone(),
            angle: 0.0,
            offset: -pixels.height() / 2.0,
            swapped_quarter: false,
            swapped_three_quarter: false,
            swap_colors: false,
        })))
    }
}

struct SpinStep {
    spin: Spin,
    angle: f64,
    // Where the plane crosses the trunk.
    offset: f64,
    swapped_quarter: bool,
    swapped_three_quarter: bool,
    swap_colors: bool,
}

impl PatternStep for SpinStep {
    fn step(&mut self, pixels: &mut Pixels) -> TreevisResult<Resume> {
        let slope = self.angle.tan();
        for (p, color) in pixels.iter_mut() {
            let below = slope * p.z <= p.z + self.offset;
            *color = if below ^ self.swap_colors {
                self.spin.color1
            } else {
                self.spin.color2
            };
        }

        self.angle += self.spin.speed;
        if self.angle > TAU {
            self.angle -= TAU;
            self.swapped_quarter = false;
            self.swapped_three_quarter = false;
        }

        // The plane flips which color is on top each time it passes vertical.
        if self.angle >= FRAC_PI_2 && !self.swapped_quarter {
            self.swap_colors = !self.swap_colors;
            self.swapped_quarter = true;
        }
        if self.angle >= 1.5 * PI && !self.swapped_three_quarter {
            self.swap_colors = !self.swap_colors;
            self.swapped_three_quarter = true;
        }

        Ok(Resume::Yielded)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/spin.rs"]
mod tests;
