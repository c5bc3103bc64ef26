use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::board::BoardView;

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Build an event from an already formatted data field.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a fetch phase starts or stops; the front-end toggles its spinner.
pub struct LoadingEvent {
    pub generation: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Broadcast once a fresh board is installed.
pub struct BoardDrawnEvent(pub BoardView);

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a cell click changes what the cell shows.
pub struct ClueRevealedEvent {
    pub category: usize,
    pub clue: usize,
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a game start aborts.
pub struct GameFailedEvent {
    pub generation: u64,
    pub message: String,
}
