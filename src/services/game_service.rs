use futures::future::try_join_all;
use tracing::{debug, error, info};

use crate::{
    config::FetchMode,
    dto::{
        board::{BoardView, RevealResponse},
        phase::PhaseResponse,
    },
    error::ServiceError,
    services::{category_service::select_categories, clue_service::fetch_category},
    state::{ApplyError, Generation, SharedState, board::Board},
};

/// Start (or restart) a game: wipe the board, fetch six fresh categories and
/// install them if no newer restart happened in the meantime.
///
/// The fetch phase runs on its own task, so it settles even when the caller
/// goes away before it finishes.
pub async fn start_game(state: &SharedState) -> Result<BoardView, ServiceError> {
    tokio::spawn(run_fetch_phase(state.clone()))
        .await
        .map_err(|err| {
            error!(error = %err, "game start task did not complete");
            ServiceError::Internal(err.to_string())
        })?
}

async fn run_fetch_phase(state: SharedState) -> Result<BoardView, ServiceError> {
    let state = &state;
    let generation = state
        .with_session_mut(|session| {
            let generation = session.begin_fetch();
            state.renderer().loading_started(generation);
            generation
        })
        .await;
    info!(generation, "game start requested");

    match fetch_board(state, generation).await {
        Ok(board) => install_board(state, generation, board).await,
        Err(err) => record_failure(state, generation, err).await,
    }
}

/// Click a cell of the board in play.
pub async fn reveal_clue(
    state: &SharedState,
    category: usize,
    clue: usize,
) -> Result<RevealResponse, ServiceError> {
    state
        .with_session_mut(|session| {
            let Some(board) = session.board_mut() else {
                return Err(ServiceError::InvalidState("no board in play".into()));
            };

            let text = board.reveal(category, clue)?;
            let reveal_state = board.get(category, clue)?.state();
            if let Some(text) = text.as_deref() {
                state.renderer().clue_revealed(category, clue, text);
            }

            Ok(RevealResponse {
                category,
                clue,
                state: reveal_state.into(),
                text,
            })
        })
        .await
        .inspect_err(|err| {
            if matches!(err, ServiceError::IndexOutOfRange { .. }) {
                error!(error = %err, "reveal requested outside the board");
            }
        })
}

/// Current board as the front-end should draw it.
pub async fn board_snapshot(state: &SharedState) -> Result<BoardView, ServiceError> {
    state
        .read_session(|session| session.board().map(BoardView::from))
        .await
        .ok_or_else(|| ServiceError::NotFound("no board in play".into()))
}

/// Phase and generation of the session.
pub async fn session_phase(state: &SharedState) -> PhaseResponse {
    state
        .read_session(|session| PhaseResponse::new(session.id, session.snapshot()))
        .await
}

async fn fetch_board(state: &SharedState, generation: Generation) -> Result<Board, ServiceError> {
    let source = state.source();
    let ids = select_categories(source, state.config().category_pool_size()).await?;

    // Skip the clue requests when a restart already replaced this phase.
    if !state.is_loading(generation).await {
        return Err(ServiceError::Superseded { generation });
    }

    let categories = match state.config().fetch_mode() {
        FetchMode::Sequential => {
            let mut categories = Vec::with_capacity(ids.len());
            for id in ids {
                categories.push(fetch_category(source, id).await?);
            }
            categories
        }
        FetchMode::Concurrent => {
            try_join_all(ids.into_iter().map(|id| fetch_category(source, id))).await?
        }
    };

    Ok(Board::new(generation, categories)?)
}

async fn install_board(
    state: &SharedState,
    generation: Generation,
    board: Board,
) -> Result<BoardView, ServiceError> {
    state
        .with_session_mut(|session| match session.replace(generation, board) {
            Ok(board) => {
                let renderer = state.renderer();
                renderer.board_drawn(board);
                renderer.loading_finished(generation);
                info!(generation, "board ready");
                Ok(BoardView::from(board))
            }
            Err(err) => Err(discarded(generation, err)),
        })
        .await
}

async fn record_failure(
    state: &SharedState,
    generation: Generation,
    err: ServiceError,
) -> Result<BoardView, ServiceError> {
    if let ServiceError::Superseded { .. } = err {
        info!(generation, "game start superseded before clue fetch");
        return Err(err);
    }

    state
        .with_session_mut(|session| match session.fail_fetch(generation) {
            Ok(()) => {
                error!(generation, error = %err, "game start failed");
                let renderer = state.renderer();
                renderer.loading_finished(generation);
                renderer.game_failed(generation, &err.to_string());
                Err(err)
            }
            Err(apply) => {
                debug!(generation, error = %err, "dropping failure of a superseded game start");
                Err(discarded(generation, apply))
            }
        })
        .await
}

fn discarded(generation: Generation, err: ApplyError) -> ServiceError {
    match err {
        ApplyError::StaleGeneration { current, .. } => {
            info!(generation, current, "discarding superseded game start");
            ServiceError::Superseded { generation }
        }
        ApplyError::NotLoading { .. } => ServiceError::InvalidState(err.to_string()),
    }
}
