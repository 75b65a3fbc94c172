use std::sync::{Arc, Mutex};
use std::time::Duration;

use tutor_core::model::{SteppedAnimation, SteppedFrame};

use super::hold;

/// Render callback for step-indexed visualizations.
pub type SteppedRender = Box<dyn FnMut(&SteppedFrame) + Send>;

struct Shared {
    anim: SteppedAnimation,
    render: SteppedRender,
    epoch: u64,
}

impl Shared {
    fn render_current(&mut self) {
        let frame = self.anim.current_frame();
        (self.render)(&frame);
    }
}

/// Drives a [`SteppedAnimation`] on a fixed inter-step delay.
///
/// The delay paces human reading of the step narration (the original
/// visualizations use 1.5 s). Playback renders the current step immediately,
/// then advances once per delay until the terminal complete frame; the
/// advance loop follows the same epoch discipline as the continuous player,
/// so re-entrant plays cannot stack.
pub struct SteppedPlayer {
    shared: Arc<Mutex<Shared>>,
    delay: Duration,
}

impl SteppedPlayer {
    /// Wraps an animation and renders its initial frame once.
    #[must_use]
    pub fn new(anim: SteppedAnimation, delay: Duration, render: SteppedRender) -> Self {
        let shared = Arc::new(Mutex::new(Shared {
            anim,
            render,
            epoch: 0,
        }));
        hold(&shared).render_current();
        Self { shared, delay }
    }

    /// Starts stepping from the current position. Returns `false` when
    /// already playing or when the sequence has completed.
    pub fn play(&self) -> bool {
        let epoch = {
            let mut guard = hold(&self.shared);
            if !guard.anim.play() {
                return false;
            }
            guard.render_current();
            guard.epoch += 1;
            guard.epoch
        };

        let shared = Arc::clone(&self.shared);
        let delay = self.delay;
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(delay).await;
                let mut guard = hold(&shared);
                if guard.epoch != epoch || !guard.anim.is_playing() {
                    break;
                }
                let frame = guard.anim.advance();
                (guard.render)(&frame);
                if frame == SteppedFrame::Complete {
                    break;
                }
            }
        });
        true
    }

    /// Cancels the pending advance without moving the position.
    pub fn pause(&self) {
        hold(&self.shared).anim.pause();
    }

    /// Manual single advance while paused; renders the frame it lands on.
    /// A no-op during playback and after completion.
    pub fn step(&self) -> bool {
        let mut guard = hold(&self.shared);
        if guard.anim.is_playing() || guard.anim.is_complete() {
            return false;
        }
        let frame = guard.anim.advance();
        (guard.render)(&frame);
        true
    }

    /// Cancels any pending advance, returns to step 0, and renders the
    /// initial frame.
    pub fn reset(&self) {
        let mut guard = hold(&self.shared);
        guard.anim.reset();
        guard.render_current();
    }

    /// Renders the current state outside the play loop.
    pub fn draw(&self) {
        hold(&self.shared).render_current();
    }

    #[must_use]
    pub fn position(&self) -> usize {
        hold(&self.shared).anim.position()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        hold(&self.shared).anim.is_playing()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        hold(&self.shared).anim.is_complete()
    }
}
