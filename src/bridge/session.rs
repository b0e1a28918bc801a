//! Generator bridge: owns the pattern runtime and the single generator session driven
//! through it.
//!
//! One [`GeneratorBridge::advance_and_snapshot`] call is one logical frame on the
//! interpreter side. It advances the generator exactly once (creating it lazily and
//! recreating it on end-of-sequence), then returns whatever the pattern's backing state
//! holds. Generator faults are printed on the runtime's console and reset the session;
//! they never escape as errors.

use crate::color::packed::PackedLightState;
use crate::foundation::error::{TreevisError, TreevisResult};
use crate::pattern::runtime::{PatternRuntime, Resume};

/// Observable session state between frames.
///
/// `Exhausted` and `Faulted` are transient inside one advance and are never observed
/// after it returns; the enum carries them so outcomes can name the path taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No generator; the next advance creates one.
    Absent,
    /// A primed generator is waiting for its next step.
    Active,
    /// The generator reached its end of sequence.
    Exhausted,
    /// Creating or advancing the generator failed.
    Faulted,
}

/// What one advance did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A new generator was created and primed.
    Started,
    /// The running generator produced its next step.
    Stepped,
    /// The running generator ended and a fresh one was created and primed.
    Restarted,
    /// The pattern produced no generator.
    NoGenerator,
    /// Creation or priming failed; the session is absent.
    CreateFailed,
    /// Advancing the running generator failed; the session is absent.
    StepFailed,
}

enum Session<G> {
    Absent,
    Active(G),
}

/// Drives one pattern runtime a frame at a time.
pub struct GeneratorBridge<R: PatternRuntime> {
    runtime: R,
    session: Session<R::Generator>,
    generations: u64,
}

impl<R: PatternRuntime> GeneratorBridge<R> {
    /// Wrap `runtime` with no generator yet.
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            session: Session::Absent,
            generations: 0,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        match self.session {
            Session::Absent => SessionState::Absent,
            Session::Active(_) => SessionState::Active,
        }
    }

    /// Number of generators successfully created so far.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// The wrapped runtime.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// The wrapped runtime, mutably. The generator session is left untouched.
    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    /// Drop the session and hand back the runtime.
    pub fn into_runtime(self) -> R {
        self.runtime
    }

    /// Advance the session by exactly one step.
    pub fn advance(&mut self) -> AdvanceOutcome {
        match std::mem::replace(&mut self.session, Session::Absent) {
            Session::Absent => self.start(false),
            Session::Active(mut generator) => match self.runtime.resume(&mut generator) {
                Ok(Resume::Yielded) => {
                    self.session = Session::Active(generator);
                    AdvanceOutcome::Stepped
                }
                Ok(Resume::Finished) => {
                    drop(generator);
                    tracing::debug!(state = ?SessionState::Exhausted, "generator finished, recreating");
                    self.start(true)
                }
                Err(err) => {
                    drop(generator);
                    self.fault(&err);
                    AdvanceOutcome::StepFailed
                }
            },
        }
    }

    /// Advance once, then materialize the pattern's current backing state.
    ///
    /// The snapshot is taken whatever the advance did, so a failed step or creation leaves
    /// the previous frame's colors in place. Only a failure to materialize is returned.
    pub fn advance_and_snapshot(&mut self) -> TreevisResult<PackedLightState> {
        let outcome = self.advance();
        tracing::trace!(?outcome, "advanced generator");
        self.runtime.request_frame()
    }

    fn start(&mut self, after_exhaustion: bool) -> AdvanceOutcome {
        let mut generator = match self.runtime.create() {
            Ok(Some(generator)) => generator,
            Ok(None) => return AdvanceOutcome::NoGenerator,
            Err(err) => {
                self.fault(&err);
                return AdvanceOutcome::CreateFailed;
            }
        };
        self.generations += 1;

        match self.runtime.resume(&mut generator) {
            Ok(Resume::Yielded) => {
                self.session = Session::Active(generator);
                if after_exhaustion {
                    AdvanceOutcome::Restarted
                } else {
                    AdvanceOutcome::Started
                }
            }
            Ok(Resume::Finished) => {
                self.fault(&TreevisError::pattern("generator finished before its first step"));
                AdvanceOutcome::CreateFailed
            }
            Err(err) => {
                self.fault(&err);
                AdvanceOutcome::CreateFailed
            }
        }
    }

    fn fault(&mut self, err: &TreevisError) {
        tracing::warn!(state = ?SessionState::Faulted, error = %err, "pattern generator fault");
        self.runtime
            .report(&format!("Error in pattern generator: {err}"));
        self.session = Session::Absent;
    }
}

impl<R: PatternRuntime + std::fmt::Debug> std::fmt::Debug for GeneratorBridge<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorBridge")
            .field("runtime", &self.runtime)
            .field("state", &self.state())
            .field("generations", &self.generations)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/session.rs"]
mod tests;
