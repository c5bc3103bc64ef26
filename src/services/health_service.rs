use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState, state::state_machine::SessionPhase};

/// Report `degraded` while the last game start has failed.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let snapshot = state.snapshot().await;
    if snapshot.phase == SessionPhase::Failed {
        warn!(
            generation = snapshot.generation,
            "last game start failed (degraded mode)"
        );
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
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

    #[tokio::test]
    async fn failed_start_degrades_until_the_next_success() {
        let source = Arc::new(MemoryTriviaSource::with_categories(1..=6, 5));
        source.mark_unavailable(1);
        let state = AppState::new(AppConfig::default(), source.clone());
        assert_eq!(health_status(&state).await.status, "ok");

        game_service::start_game(&state).await.unwrap_err();
        assert_eq!(health_status(&state).await.status, "degraded");

        source.add_category(7, 5);
        source.set_pool(2..=7);
        game_service::start_game(&state).await.unwrap();
        assert_eq!(health_status(&state).await.status, "ok");
    }
}
