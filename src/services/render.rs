//! Render collaborator: the port the game core notifies of loading and board
//! changes, and its SSE-backed implementation.

use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        board::BoardView,
        sse::{BoardDrawnEvent, ClueRevealedEvent, GameFailedEvent, LoadingEvent, ServerEvent},
    },
    state::{SseHub, board::Board, state_machine::Generation},
};

const EVENT_LOADING_STARTED: &str = "loading.started";
const EVENT_LOADING_FINISHED: &str = "loading.finished";
pub(crate) const EVENT_BOARD_DRAWN: &str = "board.drawn";
const EVENT_CLUE_REVEALED: &str = "clue.revealed";
const EVENT_GAME_FAILED: &str = "game.failed";

/// Receives state changes from the game core. Calls happen while the session
/// lock is held, so implementations must not block.
pub trait Renderer: Send + Sync {
    /// A fetch phase began; show the loading view.
    fn loading_started(&self, generation: Generation);
    /// A fetch phase ended (successfully or not); dismiss the loading view.
    fn loading_finished(&self, generation: Generation);
    /// A fresh board is in play; draw the full grid.
    fn board_drawn(&self, board: &Board);
    /// Paint `text` into one cell.
    fn clue_revealed(&self, category: usize, clue: usize, text: &str);
    /// A game start aborted.
    fn game_failed(&self, generation: Generation, message: &str);
}

/// Renderer that publishes every notification on the SSE event stream.
pub struct SseRenderer {
    hub: SseHub,
}

impl SseRenderer {
    /// Wrap the hub the `/sse/events` route subscribes to.
    pub fn new(hub: SseHub) -> Self {
        Self { hub }
    }

    fn send(&self, event: &str, payload: &impl Serialize) {
        match ServerEvent::json(Some(event.to_string()), payload) {
            Ok(event) => self.hub.broadcast(event),
            Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
        }
    }
}

impl Renderer for SseRenderer {
    fn loading_started(&self, generation: Generation) {
        self.send(EVENT_LOADING_STARTED, &LoadingEvent { generation });
    }

    fn loading_finished(&self, generation: Generation) {
        self.send(EVENT_LOADING_FINISHED, &LoadingEvent { generation });
    }

    fn board_drawn(&self, board: &Board) {
        self.send(EVENT_BOARD_DRAWN, &BoardDrawnEvent(BoardView::from(board)));
    }

    fn clue_revealed(&self, category: usize, clue: usize, text: &str) {
        let payload = ClueRevealedEvent {
            category,
            clue,
            text: text.to_string(),
        };
        self.send(EVENT_CLUE_REVEALED, &payload);
    }

    fn game_failed(&self, generation: Generation, message: &str) {
        let payload = GameFailedEvent {
            generation,
            message: message.to_string(),
        };
        self.send(EVENT_GAME_FAILED, &payload);
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// One recorded renderer notification.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RenderCall {
        LoadingStarted(Generation),
        LoadingFinished(Generation),
        BoardDrawn(Generation, Vec<String>),
        ClueRevealed(usize, usize, String),
        GameFailed(Generation),
    }

    /// Renderer that records every call for later assertions.
    #[derive(Default)]
    pub struct RecordingRenderer {
        calls: Mutex<Vec<RenderCall>>,
    }

    impl RecordingRenderer {
        pub fn calls(&self) -> Vec<RenderCall> {
            self.calls.lock().unwrap().clone()
        }

        fn push(&self, call: RenderCall) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl Renderer for RecordingRenderer {
        fn loading_started(&self, generation: Generation) {
            self.push(RenderCall::LoadingStarted(generation));
        }

        fn loading_finished(&self, generation: Generation) {
            self.push(RenderCall::LoadingFinished(generation));
        }

        fn board_drawn(&self, board: &Board) {
            let titles = board
                .categories()
                .iter()
                .map(|category| category.title.clone())
                .collect();
            self.push(RenderCall::BoardDrawn(board.generation(), titles));
        }

        fn clue_revealed(&self, category: usize, clue: usize, text: &str) {
            self.push(RenderCall::ClueRevealed(category, clue, text.to_string()));
        }

        fn game_failed(&self, generation: Generation, _message: &str) {
            self.push(RenderCall::GameFailed(generation));
        }
    }
}
