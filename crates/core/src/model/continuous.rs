use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ContinuousError {
    #[error("step size must be finite and positive, got {provided}")]
    InvalidStepSize { provided: f64 },

    #[error("a looping animation needs at least one phase")]
    NoPhases,
}

/// What happens when `progress` reaches the end of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleMode {
    /// Wrap `progress` back to 0 and advance the phase counter. Used by
    /// visualizations that cycle through an enumerated set of illustrated
    /// phases indefinitely.
    Loop { phases: usize },
    /// Hold `progress` at 1 and stop. Used by one-shot visualizations.
    Clamp,
}

/// Read-only snapshot handed to the render callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousFrame {
    pub progress: f64,
    pub phase: usize,
    pub playing: bool,
}

/// Outcome of a single scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not playing; nothing changed and nothing should be rendered.
    Idle,
    /// `progress` moved forward within the current cycle.
    Advanced,
    /// `progress` crossed 1 and wrapped to 0; the phase counter advanced.
    Wrapped,
    /// `progress` reached 1 in clamp mode; playback stopped.
    Completed,
}

/// Progress-interpolated animation state machine.
///
/// Owns a `progress` value in `[0, 1]` advanced by a fixed increment on each
/// tick, plus an auxiliary phase counter for looping multi-phase
/// visualizations. The machine is Idle → Playing → (Idle | Complete), with
/// reset returning to Idle from anywhere. Scheduling lives with the caller;
/// this type only answers "what does one tick do".
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousAnimation {
    progress: f64,
    phase: usize,
    playing: bool,
    step_size: f64,
    mode: CycleMode,
}

impl ContinuousAnimation {
    /// Creates an animation advancing `progress` by `step_size` per tick.
    ///
    /// The original visualizations use step sizes of 0.005–0.01 against a
    /// frame-rate tick, giving full cycles of a few seconds.
    ///
    /// # Errors
    ///
    /// Returns `ContinuousError::InvalidStepSize` unless `step_size` is
    /// finite and positive, and `ContinuousError::NoPhases` for
    /// `CycleMode::Loop { phases: 0 }`.
    pub fn new(step_size: f64, mode: CycleMode) -> Result<Self, ContinuousError> {
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(ContinuousError::InvalidStepSize {
                provided: step_size,
            });
        }
        if matches!(mode, CycleMode::Loop { phases: 0 }) {
            return Err(ContinuousError::NoPhases);
        }
        Ok(Self {
            progress: 0.0,
            phase: 0,
            playing: false,
            step_size,
            mode,
        })
    }

    /// Starts playback. Returns `false` without touching state when already
    /// playing (re-entrant plays must not stack tick chains) or when a
    /// clamped animation has completed and needs a reset first.
    pub fn play(&mut self) -> bool {
        if self.playing || self.is_complete() {
            return false;
        }
        self.playing = true;
        true
    }

    /// Stops playback, keeping `progress` where it is.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Back to the initial frame: paused, progress 0, phase 0.
    pub fn reset(&mut self) {
        self.playing = false;
        self.progress = 0.0;
        self.phase = 0;
    }

    /// Advances one tick. `progress` is only mutated while playing.
    pub fn tick(&mut self) -> Tick {
        if !self.playing {
            return Tick::Idle;
        }
        self.progress += self.step_size;
        if self.progress >= 1.0 {
            return match self.mode {
                CycleMode::Loop { phases } => {
                    self.progress = 0.0;
                    self.phase = (self.phase + 1) % phases;
                    Tick::Wrapped
                }
                CycleMode::Clamp => {
                    self.progress = 1.0;
                    self.playing = false;
                    Tick::Completed
                }
            };
        }
        Tick::Advanced
    }

    /// Slider-driven override of `progress`, clamped into `[0, 1]`.
    pub fn scrub(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    #[must_use]
    pub fn frame(&self) -> ContinuousFrame {
        ContinuousFrame {
            progress: self.progress,
            phase: self.phase,
            playing: self.playing,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once a clamped animation has reached the end of its cycle.
    /// Looping animations never complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.mode, CycleMode::Clamp) && self.progress >= 1.0
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn phase(&self) -> usize {
        self.phase
    }
}
