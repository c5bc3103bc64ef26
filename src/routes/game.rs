use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::{
        board::{BoardView, RevealResponse},
        phase::PhaseResponse,
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes driving the board: start, snapshot and cell clicks.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game/start", post(start_game))
        .route("/game/board", get(get_board))
        .route("/game/phase", get(get_phase))
        .route("/game/reveal/{category}/{clue}", post(reveal_clue))
}

/// Start or restart the game; resolves once the new board is in play.
#[utoipa::path(
    post,
    path = "/game/start",
    tag = "game",
    responses(
        (status = 200, description = "Board fetched and installed", body = BoardView),
        (status = 409, description = "A newer restart superseded this one"),
        (status = 502, description = "The trivia API failed or returned unusable data")
    )
)]
pub async fn start_game(State(state): State<SharedState>) -> Result<Json<BoardView>, AppError> {
    Ok(Json(game_service::start_game(&state).await?))
}

/// Return the board currently in play.
#[utoipa::path(
    get,
    path = "/game/board",
    tag = "game",
    responses(
        (status = 200, description = "Current board", body = BoardView),
        (status = 404, description = "No board in play")
    )
)]
pub async fn get_board(State(state): State<SharedState>) -> Result<Json<BoardView>, AppError> {
    Ok(Json(game_service::board_snapshot(&state).await?))
}

/// Return the session phase and latest generation.
#[utoipa::path(
    get,
    path = "/game/phase",
    tag = "game",
    responses((status = 200, description = "Session phase", body = PhaseResponse))
)]
pub async fn get_phase(State(state): State<SharedState>) -> Json<PhaseResponse> {
    Json(game_service::session_phase(&state).await)
}

/// Click a cell: hidden shows the question, question shows the answer.
#[utoipa::path(
    post,
    path = "/game/reveal/{category}/{clue}",
    tag = "game",
    params(
        ("category" = usize, Path, description = "Column index, 0 to 5"),
        ("clue" = usize, Path, description = "Row index, 0 to 4")
    ),
    responses(
        (status = 200, description = "Cell state after the click", body = RevealResponse),
        (status = 400, description = "Coordinate outside the board"),
        (status = 409, description = "No board in play")
    )
)]
pub async fn reveal_clue(
    State(state): State<SharedState>,
    Path((category, clue)): Path<(usize, usize)>,
) -> Result<Json<RevealResponse>, AppError> {
    Ok(Json(game_service::reveal_clue(&state, category, clue).await?))
}
