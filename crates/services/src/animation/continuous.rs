use std::sync::{Arc, Mutex};
use std::time::Duration;

use tutor_core::model::{ContinuousAnimation, ContinuousFrame, Tick};

use super::hold;

/// Render callback for progress-interpolated visualizations. Supplied once
/// at construction; receives a read-only snapshot on every tick.
pub type ContinuousRender = Box<dyn FnMut(&ContinuousFrame) + Send>;

struct Shared {
    anim: ContinuousAnimation,
    render: ContinuousRender,
    // Bumped on every play(); a tick chain whose epoch is stale exits on its
    // next wake-up instead of racing a newer chain.
    epoch: u64,
}

impl Shared {
    fn render_current(&mut self) {
        let frame = self.anim.frame();
        (self.render)(&frame);
    }
}

/// Drives a [`ContinuousAnimation`] on a fixed tick interval.
///
/// All mutation happens under one lock, from the owning task or from
/// directly-invoked control methods; the tick loop is a spawned task that
/// sleeps between frames and re-checks that it is still wanted before each
/// advance. Calling `play` while already playing is a no-op, so two tick
/// chains can never stack and double the effective speed.
pub struct ContinuousPlayer {
    shared: Arc<Mutex<Shared>>,
    tick_every: Duration,
}

impl ContinuousPlayer {
    /// Wraps an animation and renders its initial frame once.
    #[must_use]
    pub fn new(anim: ContinuousAnimation, tick_every: Duration, render: ContinuousRender) -> Self {
        let shared = Arc::new(Mutex::new(Shared {
            anim,
            render,
            epoch: 0,
        }));
        hold(&shared).render_current();
        Self { shared, tick_every }
    }

    /// Starts the tick loop. Returns `false` when already playing or when a
    /// clamped animation has completed and needs a reset first.
    pub fn play(&self) -> bool {
        let epoch = {
            let mut guard = hold(&self.shared);
            if !guard.anim.play() {
                return false;
            }
            guard.epoch += 1;
            guard.epoch
        };

        let shared = Arc::clone(&self.shared);
        let tick_every = self.tick_every;
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(tick_every).await;
                let mut guard = hold(&shared);
                if guard.epoch != epoch || !guard.anim.is_playing() {
                    break;
                }
                let outcome = guard.anim.tick();
                guard.render_current();
                if outcome == Tick::Completed {
                    break;
                }
            }
        });
        true
    }

    /// Stops playback; the tick already scheduled is abandoned on wake-up
    /// and the last rendered frame stays on screen.
    pub fn pause(&self) {
        hold(&self.shared).anim.pause();
    }

    /// Pauses, zeroes progress and phase, and renders the initial frame.
    pub fn reset(&self) {
        let mut guard = hold(&self.shared);
        guard.anim.reset();
        guard.render_current();
    }

    /// Renders the current state outside the play loop. Idempotent: repeated
    /// calls with unchanged state produce the same frame.
    pub fn draw(&self) {
        hold(&self.shared).render_current();
    }

    /// Slider-driven override of the progress value, followed by a render.
    pub fn scrub(&self, progress: f64) {
        let mut guard = hold(&self.shared);
        guard.anim.scrub(progress);
        guard.render_current();
    }

    #[must_use]
    pub fn frame(&self) -> ContinuousFrame {
        hold(&self.shared).anim.frame()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        hold(&self.shared).anim.is_playing()
    }
}
