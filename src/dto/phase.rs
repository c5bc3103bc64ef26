use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::state_machine::{RevealState, SessionPhase, Snapshot};

/// Session phase exposed to clients (REST/SSE).
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleSessionPhase {
    /// No game started yet.
    Idle,
    /// Board is being fetched; show the loading view.
    Loading,
    /// Board is ready for clicks.
    Ready,
    /// The last game start failed.
    Failed,
}

impl From<SessionPhase> for VisibleSessionPhase {
    fn from(value: SessionPhase) -> Self {
        match value {
            SessionPhase::Idle => VisibleSessionPhase::Idle,
            SessionPhase::Loading => VisibleSessionPhase::Loading,
            SessionPhase::Ready => VisibleSessionPhase::Ready,
            SessionPhase::Failed => VisibleSessionPhase::Failed,
        }
    }
}

/// Reveal state of one cell as seen by clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleRevealState {
    Hidden,
    Question,
    Answer,
}

impl From<RevealState> for VisibleRevealState {
    fn from(value: RevealState) -> Self {
        match value {
            RevealState::Hidden => VisibleRevealState::Hidden,
            RevealState::Question => VisibleRevealState::Question,
            RevealState::Answer => VisibleRevealState::Answer,
        }
    }
}

/// Response exposing the session phase.
#[derive(Debug, Serialize, ToSchema)]
pub struct PhaseResponse {
    pub session_id: Uuid,
    pub phase: VisibleSessionPhase,
    /// Latest fetch generation (0 before the first game).
    pub generation: u64,
}

impl PhaseResponse {
    pub fn new(session_id: Uuid, snapshot: Snapshot) -> Self {
        Self {
            session_id,
            phase: snapshot.phase.into(),
            generation: snapshot.generation,
        }
    }
}
