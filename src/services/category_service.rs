use indexmap::IndexSet;
use rand::{Rng, rng};
use tracing::debug;

use crate::{
    dao::{models::CategorySummaryEntity, trivia_source::TriviaSource},
    error::ServiceError,
    services::shuffle::shuffle,
    state::board::{CATEGORIES_PER_BOARD, CategoryId},
};

/// Fetch a pool of candidate categories and pick a random board's worth of them.
pub async fn select_categories(
    source: &dyn TriviaSource,
    pool_size: usize,
) -> Result<Vec<CategoryId>, ServiceError> {
    let pool = source.list_categories(pool_size).await?;
    let received = pool.len();
    let selected = choose_categories(pool, &mut rng())?;
    debug!(requested = pool_size, received, ?selected, "selected categories");
    Ok(selected)
}

/// Deduplicate the pool, shuffle it and keep the first [`CATEGORIES_PER_BOARD`] ids.
pub fn choose_categories<R>(
    pool: Vec<CategorySummaryEntity>,
    rng: &mut R,
) -> Result<Vec<CategoryId>, ServiceError>
where
    R: Rng + ?Sized,
{
    let unique = pool
        .into_iter()
        .map(|entry| entry.id)
        .collect::<IndexSet<_>>();

    if unique.len() < CATEGORIES_PER_BOARD {
        return Err(ServiceError::InsufficientPool {
            required: CATEGORIES_PER_BOARD,
            available: unique.len(),
        });
    }

    let mut ids = unique.into_iter().collect::<Vec<_>>();
    shuffle(&mut ids, rng);
    ids.truncate(CATEGORIES_PER_BOARD);
    Ok(ids)
}
