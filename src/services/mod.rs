/// Category pool selection.
pub mod category_service;
/// Clue sampling for one board column.
pub mod clue_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Game lifecycle: start, reveal and snapshots.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Render collaborator and its SSE implementation.
pub mod render;
/// Fisher–Yates shuffling helpers.
pub mod shuffle;
/// Server-Sent Events streaming service.
pub mod sse_service;
