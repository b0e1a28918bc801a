//! treevis drives LED-tree pattern animations frame by frame.
//!
//! A pattern program runs inside an embedded interpreter as a resumable generator. treevis
//! advances that generator one step per logical frame, throttled to a target rate, decodes
//! the packed light buffer it produces and writes the colors onto a fixed list of light
//! nodes positioned in 3D.
//!
//! # Frame overview
//!
//! 1. **Pace**: the host fires a paint callback; ticks closer than the frame interval to the
//!    previous frame are skipped ([`FrameScheduler`]).
//! 2. **Advance**: the [`GeneratorBridge`] steps the pattern's generator once, recreating it at
//!    the end of its sequence and resetting it after a fault.
//! 3. **Decode**: the runtime's [`PackedLightState`] is expanded into normalized [`Rgb`]
//!    triples ([`decode_frame`]).
//! 4. **Apply**: colors land on the [`NodeRegistry`]; detached nodes are skipped. Frame cost
//!    goes to the [`FrameReporter`].
//!
//! [`LifecycleController`] owns the loop and guarantees at most one is running. Pattern
//! programs come from a [`PatternRuntime`]: native Rust patterns ([`NativeRuntime`]) or Rhai
//! scripts ([`ScriptRuntime`]).
//!
//! Everything runs on one thread; nothing in a frame blocks, and a failing frame never stops
//! the loop.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bridge;
mod color;
mod config;
mod foundation;
mod host;
mod lifecycle;
mod pattern;
mod registry;
mod report;
mod schedule;
mod topology;

pub use bridge::session::{AdvanceOutcome, GeneratorBridge, SessionState};
pub use color::model::Color;
pub use color::packed::{
    BLUE_SHIFT, GREEN_SHIFT, PackedLightState, RED_SHIFT, decode_frame, decode_packed,
};
pub use config::loop_config::LoopConfig;
pub use foundation::core::{FrameIndex, Fps, Point3, Rgb};
pub use foundation::error::{TreevisError, TreevisResult};
pub use host::refresh::{DriveSummary, RefreshDriver};
pub use lifecycle::controller::LifecycleController;
pub use pattern::console::{CONSOLE_CAPACITY, Console};
pub use pattern::native::{
    BUILTIN_PATTERNS, NativeRuntime, Pattern, PatternStep, Pixels, builtin_pattern,
};
pub use pattern::runtime::{PatternRuntime, Resume};
pub use pattern::script::ScriptRuntime;
pub use pattern::spin::Spin;
pub use registry::nodes::{ColorHandle, LightNode, NodeRegistry};
pub use report::sinks::{FrameReporter, FrameStats, Tee, TracingReporter};
pub use schedule::pacer::FramePacer;
pub use schedule::paint::{PaintQueue, PaintRequest, PaintSignal};
pub use schedule::scheduler::{FrameMetrics, FrameScheduler, TickOutcome};
pub use topology::tree::Topology;
