//! In-memory trivia source used by tests.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use futures::future::BoxFuture;
use tokio::sync::Notify;

use crate::{
    dao::{
        models::{CategoryEntity, CategorySummaryEntity, ClueEntity},
        source::{SourceError, SourceResult},
        trivia_source::TriviaSource,
    },
    state::board::CategoryId,
};

/// Handles to a held category listing: `entered` fires once the call is
/// waiting, `release` lets it return.
pub struct Hold {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
pub struct MemoryTriviaSource {
    pool: Mutex<Vec<CategoryId>>,
    categories: Mutex<HashMap<CategoryId, CategoryEntity>>,
    unavailable: Mutex<HashSet<CategoryId>>,
    malformed: Mutex<HashSet<CategoryId>>,
    delays: Mutex<VecDeque<Duration>>,
    requested: Mutex<Vec<CategoryId>>,
    completed: Arc<Mutex<Vec<CategoryId>>>,
    listing_hold: Mutex<Option<Hold>>,
    category_hold: Mutex<Option<Hold>>,
}

impl MemoryTriviaSource {
    /// Source whose pool lists `ids`, each with `clues` generated clues.
    pub fn with_categories(ids: impl IntoIterator<Item = u64>, clues: usize) -> Self {
        let source = Self::default();
        let ids = ids.into_iter().collect::<Vec<_>>();
        for id in &ids {
            source.add_category(*id, clues);
        }
        source.set_pool(ids);
        source
    }

    /// Register a category titled `category {id}` with `clues` clues.
    pub fn add_category(&self, id: u64, clues: usize) {
        let entity = CategoryEntity {
            title: format!("category {id}"),
            clues: (0..clues)
                .map(|n| ClueEntity {
                    question: format!("question {id}-{n}"),
                    answer: format!("answer {id}-{n}"),
                })
                .collect(),
        };
        self.categories.lock().unwrap().insert(id.into(), entity);
    }

    /// Replace the ids returned by the category listing.
    pub fn set_pool(&self, ids: impl IntoIterator<Item = u64>) {
        *self.pool.lock().unwrap() = ids.into_iter().map(CategoryId::from).collect();
    }

    /// Make every request for `id` fail as if the network were down.
    pub fn mark_unavailable(&self, id: u64) {
        self.unavailable.lock().unwrap().insert(id.into());
    }

    /// Make every request for `id` answer with a payload that does not decode.
    pub fn mark_malformed(&self, id: u64) {
        self.malformed.lock().unwrap().insert(id.into());
    }

    /// Delay the next category requests, one entry per call in call order.
    pub fn delay_requests(&self, delays: impl IntoIterator<Item = Duration>) {
        self.delays.lock().unwrap().extend(delays);
    }

    /// Category ids in the order they were requested.
    pub fn requested(&self) -> Vec<CategoryId> {
        self.requested.lock().unwrap().clone()
    }

    /// Category ids in the order their requests completed.
    pub fn completed(&self) -> Vec<CategoryId> {
        self.completed.lock().unwrap().clone()
    }

    /// Hold the next category listing until released. The pool is captured
    /// when the call is made, not when it is released.
    pub fn hold_next_listing(&self) -> Hold {
        arm(&self.listing_hold)
    }

    /// Hold the next category request until released. Its outcome is decided
    /// when the call is made.
    pub fn hold_next_category(&self) -> Hold {
        arm(&self.category_hold)
    }
}

fn arm(slot: &Mutex<Option<Hold>>) -> Hold {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    *slot.lock().unwrap() = Some(Hold {
        entered: entered.clone(),
        release: release.clone(),
    });
    Hold { entered, release }
}

async fn wait(hold: Option<Hold>) {
    if let Some(hold) = hold {
        hold.entered.notify_one();
        hold.release.notified().await;
    }
}

fn offline(id: &CategoryId) -> SourceError {
    SourceError::unavailable(
        format!("category `{id}` unavailable"),
        io::Error::new(io::ErrorKind::ConnectionRefused, "offline"),
    )
}

fn malformed(id: &CategoryId) -> SourceError {
    let decode = serde_json::from_str::<CategoryEntity>(r#"{"title": 1}"#).unwrap_err();
    SourceError::schema_mismatch(format!("category `{id}` payload does not decode"), decode)
}

impl TriviaSource for MemoryTriviaSource {
    fn list_categories(
        &self,
        count: usize,
    ) -> BoxFuture<'static, SourceResult<Vec<CategorySummaryEntity>>> {
        let pool = self
            .pool
            .lock()
            .unwrap()
            .iter()
            .take(count)
            .map(|id| CategorySummaryEntity {
                id: id.clone(),
                title: None,
                clues_count: None,
            })
            .collect::<Vec<_>>();
        let hold = self.listing_hold.lock().unwrap().take();

        Box::pin(async move {
            wait(hold).await;
            Ok(pool)
        })
    }

    fn get_category(&self, id: CategoryId) -> BoxFuture<'static, SourceResult<CategoryEntity>> {
        self.requested.lock().unwrap().push(id.clone());
        let result = if self.unavailable.lock().unwrap().contains(&id) {
            Err(offline(&id))
        } else if self.malformed.lock().unwrap().contains(&id) {
            Err(malformed(&id))
        } else {
            self.categories
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| offline(&id))
        };
        let hold = self.category_hold.lock().unwrap().take();
        let delay = self.delays.lock().unwrap().pop_front();
        let completed = self.completed.clone();

        Box::pin(async move {
            wait(hold).await;
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            completed.lock().unwrap().push(id);
            result
        })
    }
}
