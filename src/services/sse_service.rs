use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    mpsc,
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};

use crate::{
    dto::{
        board::BoardView,
        sse::{BoardDrawnEvent, ServerEvent},
    },
    services::render::EVENT_BOARD_DRAWN,
    state::SharedState,
};

/// Subscribe to the board event stream.
///
/// Also returns the board currently in play as a `board.drawn` event so a
/// late-joining front-end can draw it right away.
pub async fn subscribe(
    state: &SharedState,
) -> (broadcast::Receiver<ServerEvent>, Option<ServerEvent>) {
    let receiver = state.events().subscribe();
    let board = state
        .read_session(|session| session.board().map(BoardView::from))
        .await;

    let initial = board.and_then(|board| {
        ServerEvent::json(Some(EVENT_BOARD_DRAWN.to_string()), &BoardDrawnEvent(board))
            .inspect_err(|err| warn!(error = %err, "failed to serialize initial board"))
            .ok()
    });

    (receiver, initial)
}

/// Convert a broadcast receiver into an SSE response, forwarding events until
/// the client disconnects.
pub fn to_sse_stream(
    mut receiver: broadcast::Receiver<ServerEvent>,
    initial: Option<ServerEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);

    tokio::spawn(async move {
        if let Some(payload) = initial {
            if tx.send(Ok(to_event(payload))).await.is_err() {
                return;
            }
        }

        loop {
            tokio::select! {
                _ = tx.closed() => break,
                recv_result = receiver.recv() => {
                    match recv_result {
                        Ok(payload) => {
                            if tx.send(Ok(to_event(payload))).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "SSE subscriber lagged; skipping events");
                        }
                    }
                }
            }
        }

        info!("SSE stream disconnected");
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

fn to_event(payload: ServerEvent) -> Event {
    let event = Event::default().data(payload.data);
    match payload.event {
        Some(name) => event.event(name),
        None => event,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig, dao::trivia_source::memory::MemoryTriviaSource,
        services::game_service, state::AppState,
    };

    fn state() -> SharedState {
        AppState::new(
            AppConfig::default(),
            Arc::new(MemoryTriviaSource::with_categories(1..=6, 5)),
        )
    }

    #[tokio::test]
    async fn no_initial_event_before_the_first_game() {
        let state = state();
        let (_receiver, initial) = subscribe(&state).await;
        assert!(initial.is_none());
    }

    #[tokio::test]
    async fn late_subscriber_gets_the_current_board() {
        let state = state();
        game_service::start_game(&state).await.unwrap();

        let (_receiver, initial) = subscribe(&state).await;
        let initial = initial.unwrap();
        assert_eq!(initial.event.as_deref(), Some(EVENT_BOARD_DRAWN));
        let board: serde_json::Value = serde_json::from_str(&initial.data).unwrap();
        assert_eq!(board["generation"], 1);
    }

    #[tokio::test]
    async fn subscriber_sees_game_events() {
        let state = state();
        let (mut receiver, _) = subscribe(&state).await;
        game_service::start_game(&state).await.unwrap();

        let names = [
            receiver.recv().await.unwrap().event,
            receiver.recv().await.unwrap().event,
            receiver.recv().await.unwrap().event,
        ];
        assert_eq!(
            names.map(|name| name.unwrap_or_default()),
            [
                "loading.started".to_string(),
                "board.drawn".to_string(),
                "loading.finished".to_string(),
            ]
        );
    }
}
