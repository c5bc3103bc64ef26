use thiserror::Error;

/// Monotonic tag identifying one fetch phase (one game start).
pub type Generation = u64;

/// How much of a single clue is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Only the placeholder is shown.
    Hidden,
    /// The question text is shown.
    Question,
    /// The answer text is shown; further clicks are ignored.
    Answer,
}

impl RevealState {
    /// Next state after a click, `None` when the state is absorbing.
    pub fn advance(self) -> Option<Self> {
        match self {
            RevealState::Hidden => Some(RevealState::Question),
            RevealState::Question => Some(RevealState::Answer),
            RevealState::Answer => None,
        }
    }
}

/// High-level phases of the game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No game has been started yet.
    Idle,
    /// Categories and clues are being fetched.
    Loading,
    /// A board is installed and accepts clicks.
    Ready,
    /// The last fetch phase failed; no board is in play.
    Failed,
}

/// Errors raised when a fetch phase tries to finish.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// A restart began a newer fetch phase; this result must be dropped.
    #[error("fetch generation {got} is stale (current generation {current})")]
    StaleGeneration {
        /// Generation currently in charge of the session.
        current: Generation,
        /// Generation that tried to finish.
        got: Generation,
    },
    /// The generation already finished.
    #[error("fetch generation {generation} already finished ({phase:?})")]
    NotLoading {
        /// Generation that tried to finish.
        generation: Generation,
        /// Phase the session is in.
        phase: SessionPhase,
    },
}

/// Snapshot of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Current phase.
    pub phase: SessionPhase,
    /// Latest generation handed out (0 before the first game).
    pub generation: Generation,
}

/// State machine tracking fetch phases and the generation that owns the board.
///
/// Every call to [`SessionMachine::begin_fetch`] supersedes whatever phase was
/// in flight; only the newest generation may complete or fail.
#[derive(Debug, Clone)]
pub struct SessionMachine {
    phase: SessionPhase,
    generation: Generation,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            generation: 0,
        }
    }
}

impl SessionMachine {
    /// Create a machine in the idle phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Latest generation handed out.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Create a snapshot of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            generation: self.generation,
        }
    }

    /// Whether `generation` is the fetch phase currently loading.
    pub fn is_loading(&self, generation: Generation) -> bool {
        self.phase == SessionPhase::Loading && self.generation == generation
    }

    /// Start a new fetch phase from any phase, returning its generation.
    pub fn begin_fetch(&mut self) -> Generation {
        self.generation += 1;
        self.phase = SessionPhase::Loading;
        self.generation
    }

    /// Mark `generation` as successfully loaded.
    pub fn complete(&mut self, generation: Generation) -> Result<(), ApplyError> {
        self.ensure_loading(generation)?;
        self.phase = SessionPhase::Ready;
        Ok(())
    }

    /// Mark `generation` as failed.
    pub fn fail(&mut self, generation: Generation) -> Result<(), ApplyError> {
        self.ensure_loading(generation)?;
        self.phase = SessionPhase::Failed;
        Ok(())
    }

    fn ensure_loading(&self, generation: Generation) -> Result<(), ApplyError> {
        if generation != self.generation {
            return Err(ApplyError::StaleGeneration {
                current: self.generation,
                got: generation,
            });
        }

        if self.phase != SessionPhase::Loading {
            return Err(ApplyError::NotLoading {
                generation,
                phase: self.phase,
            });
        }

        Ok(())
    }
}
