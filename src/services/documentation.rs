use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the trivia board backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::event_stream,
        crate::routes::game::start_game,
        crate::routes::game::get_board,
        crate::routes::game::get_phase,
        crate::routes::game::reveal_clue,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::board::BoardView,
            crate::dto::board::CategoryView,
            crate::dto::board::ClueView,
            crate::dto::board::RevealResponse,
            crate::dto::phase::PhaseResponse,
            crate::dto::phase::VisibleSessionPhase,
            crate::dto::phase::VisibleRevealState,
            crate::dto::sse::LoadingEvent,
            crate::dto::sse::ClueRevealedEvent,
            crate::dto::sse::GameFailedEvent,
            crate::state::board::CategoryId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events stream"),
        (name = "game", description = "Board lifecycle and cell reveals"),
    )
)]
pub struct ApiDoc;
