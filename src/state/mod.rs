pub mod board;
pub mod game;
mod sse;
pub mod state_machine;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::AppConfig,
    dao::trivia_source::TriviaSource,
    services::render::{Renderer, SseRenderer},
    state::game::GameSession,
};

pub use self::sse::SseHub;
pub use self::state_machine::{ApplyError, Generation, Snapshot};

pub type SharedState = Arc<AppState>;

const EVENTS_CAPACITY: usize = 32;

/// Central application state: configuration, the trivia source, the render
/// collaborator and the game session.
pub struct AppState {
    config: AppConfig,
    source: Arc<dyn TriviaSource>,
    events: SseHub,
    renderer: Arc<dyn Renderer>,
    session: RwLock<GameSession>,
}

impl AppState {
    /// Construct a new [`AppState`] rendering through the SSE event hub.
    pub fn new(config: AppConfig, source: Arc<dyn TriviaSource>) -> SharedState {
        let events = SseHub::new(EVENTS_CAPACITY);
        let renderer = Arc::new(SseRenderer::new(events.clone()));
        Self::build(config, source, events, renderer)
    }

    /// Construct a new [`AppState`] with a custom render collaborator.
    pub fn with_renderer(
        config: AppConfig,
        source: Arc<dyn TriviaSource>,
        renderer: Arc<dyn Renderer>,
    ) -> SharedState {
        Self::build(config, source, SseHub::new(EVENTS_CAPACITY), renderer)
    }

    fn build(
        config: AppConfig,
        source: Arc<dyn TriviaSource>,
        events: SseHub,
        renderer: Arc<dyn Renderer>,
    ) -> SharedState {
        Arc::new(Self {
            config,
            source,
            events,
            renderer,
            session: RwLock::new(GameSession::new()),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Trivia API the fetch phase reads from.
    pub fn source(&self) -> &dyn TriviaSource {
        self.source.as_ref()
    }

    /// Render collaborator notified of loading and board changes.
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Broadcast hub backing the `/sse/events` stream.
    pub fn events(&self) -> &SseHub {
        &self.events
    }

    /// Snapshot the session state machine.
    pub async fn snapshot(&self) -> Snapshot {
        self.session.read().await.snapshot()
    }

    /// Whether `generation` is still the fetch phase in charge.
    pub async fn is_loading(&self, generation: Generation) -> bool {
        self.session.read().await.is_loading(generation)
    }

    /// Run `f` with shared access to the session.
    pub async fn read_session<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        let guard = self.session.read().await;
        f(&guard)
    }

    /// Run `f` with exclusive access to the session.
    pub async fn with_session_mut<R>(&self, f: impl FnOnce(&mut GameSession) -> R) -> R {
        let mut guard = self.session.write().await;
        f(&mut guard)
    }
}
