//! Host per-paint timing primitive.
//!
//! A consumer registers interest in the next paint and receives a [`PaintRequest`]; the host
//! later fires that request with a timestamp. Registration is one-shot, so a loop that wants
//! to keep running re-registers from inside each callback.

use std::cell::Cell;
use std::rc::Rc;

/// Handle for one registered paint callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaintRequest(pub u64);

/// Something that can schedule and cancel a callback on the next display paint.
pub trait PaintSignal {
    /// Register for the next paint.
    fn request(&self) -> PaintRequest;

    /// Drop a registration that has not fired yet. Unknown requests are ignored.
    fn cancel(&self, request: PaintRequest);
}

/// In-process paint signal holding at most one pending registration.
///
/// Clones share the same queue: the loop side requests and cancels, the host side
/// [`take`](Self::take)s the pending request when it paints.
#[derive(Clone, Debug, Default)]
pub struct PaintQueue {
    inner: Rc<QueueState>,
}

#[derive(Debug, Default)]
struct QueueState {
    next_id: Cell<u64>,
    pending: Cell<Option<PaintRequest>>,
}

impl PaintQueue {
    /// A queue with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the pending registration, if any.
    pub fn take(&self) -> Option<PaintRequest> {
        self.inner.pending.take()
    }

    /// The pending registration, left in place.
    pub fn pending(&self) -> Option<PaintRequest> {
        self.inner.pending.get()
    }
}

impl PaintSignal for PaintQueue {
    fn request(&self) -> PaintRequest {
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        let request = PaintRequest(id);
        if let Some(prev) = self.inner.pending.replace(Some(request)) {
            tracing::trace!(replaced = prev.0, "paint request superseded");
        }
        request
    }

    fn cancel(&self, request: PaintRequest) {
        if self.inner.pending.get() == Some(request) {
            self.inner.pending.set(None);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/paint.rs"]
mod tests;
