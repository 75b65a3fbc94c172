use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SteppedError {
    #[error("a stepped animation needs at least one step")]
    Empty,
}

/// Read-only snapshot handed to the render callback.
///
/// The terminal `Complete` frame is rendered exactly once, after the last
/// step; it is the "narration finished" sentinel, not a step of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SteppedFrame {
    Step {
        index: usize,
        label: String,
        playing: bool,
    },
    Complete,
}

/// Step-indexed animation state machine.
///
/// These visualizations narrate a fixed, enumerable sequence of conceptual
/// phases ("loss computed at root", "gradient flows to children", …) where
/// interpolating between phases is meaningless; a caller-side delay paces
/// human reading. The machine is Idle → Playing → Complete, with reset
/// returning to Idle at step 0. `position == len` is the Complete state;
/// the position never decreases except through reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteppedAnimation {
    steps: Vec<String>,
    position: usize,
    playing: bool,
}

impl SteppedAnimation {
    /// Creates an animation over the given ordered step labels.
    ///
    /// # Errors
    ///
    /// Returns `SteppedError::Empty` for an empty step list.
    pub fn new(steps: Vec<String>) -> Result<Self, SteppedError> {
        if steps.is_empty() {
            return Err(SteppedError::Empty);
        }
        Ok(Self {
            steps,
            position: 0,
            playing: false,
        })
    }

    /// Convenience constructor from string literals.
    ///
    /// # Errors
    ///
    /// Same as [`SteppedAnimation::new`].
    pub fn from_labels<I, S>(labels: I) -> Result<Self, SteppedError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(Into::into).collect())
    }

    /// Starts playback from the current position. Returns `false` without
    /// touching state when already playing or already complete.
    pub fn play(&mut self) -> bool {
        if self.playing || self.is_complete() {
            return false;
        }
        self.playing = true;
        true
    }

    /// Stops the automatic advance, keeping the current position.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Back to the initial frame: paused at step 0.
    pub fn reset(&mut self) {
        self.playing = false;
        self.position = 0;
    }

    /// Moves one step forward and returns the frame now due for rendering.
    ///
    /// Stepping past the last step yields the terminal `Complete` frame and
    /// stops playback; further calls keep yielding `Complete` without moving.
    pub fn advance(&mut self) -> SteppedFrame {
        if self.position < self.steps.len() {
            self.position += 1;
        }
        if self.position == self.steps.len() {
            self.playing = false;
        }
        self.current_frame()
    }

    /// The frame for the current position, without advancing.
    #[must_use]
    pub fn current_frame(&self) -> SteppedFrame {
        match self.steps.get(self.position) {
            Some(label) => SteppedFrame::Step {
                index: self.position,
                label: label.clone(),
                playing: self.playing,
            },
            None => SteppedFrame::Complete,
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; kept for API completeness alongside `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.steps
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position >= self.steps.len()
    }
}
