//! Play/pause/step/reset drivers for the canvas animation state machines.
//!
//! The state machines themselves live in `tutor_core::model`; the players
//! here add the cooperative scheduling: one spawned task per active playback
//! that sleeps, re-checks liveness, advances, and renders. Cancellation is
//! cooperative — pausing only prevents the *next* wake-up from doing work.

use std::sync::{Mutex, MutexGuard, PoisonError};

mod continuous;
mod stepped;

pub use continuous::{ContinuousPlayer, ContinuousRender};
pub use stepped::{SteppedPlayer, SteppedRender};

/// A panicking render callback must not wedge the transport controls, so
/// lock poisoning is shrugged off rather than propagated.
pub(crate) fn hold<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
