//! Boundary to the embedded interpreter that runs a pattern program.
//!
//! Per logical frame the interpreter has to lazily create a generator, advance it one
//! step, materialize the frame and hand back one packed color per node. The trait splits
//! that script into separate calls so the generator session can live on the Rust side.

use crate::color::packed::PackedLightState;
use crate::foundation::error::TreevisResult;

/// Result of advancing a generator by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resume {
    /// The generator produced a step and can be resumed again.
    Yielded,
    /// End of sequence; the generator must not be resumed again.
    Finished,
}

/// A host-controlled interpreter running one pattern program.
pub trait PatternRuntime {
    /// Resumable per-pattern state held between frames.
    type Generator;

    /// Instantiate a fresh generator from the current pattern definition.
    ///
    /// `Ok(None)` means the pattern produced no generator; that is not a fault.
    fn create(&mut self) -> TreevisResult<Option<Self::Generator>>;

    /// Advance `generator` by one step, mutating the pattern's backing state.
    fn resume(&mut self, generator: &mut Self::Generator) -> TreevisResult<Resume>;

    /// Interpreter-side console. Faults the runtime handles itself are printed here,
    /// separately from the frame loop's own log channel.
    fn report(&mut self, message: &str);

    /// Drain the console lines gathered since the last call, oldest first.
    ///
    /// Runtimes without a console return nothing.
    fn take_console(&mut self) -> Vec<String> {
        Vec::new()
    }

    /// Materialize the current backing state, one packed value per node.
    ///
    /// Independent of whether the last `resume` succeeded.
    fn request_frame(&mut self) -> TreevisResult<PackedLightState>;
}
