use rand::{Rng, rng};
use tracing::debug;

use crate::{
    dao::{models::CategoryEntity, trivia_source::TriviaSource},
    error::ServiceError,
    services::shuffle::sample,
    state::board::{CLUES_PER_CATEGORY, Category, CategoryId, Clue},
};

/// Fetch one category and sample a column's worth of hidden clues from it.
pub async fn fetch_category(
    source: &dyn TriviaSource,
    id: CategoryId,
) -> Result<Category, ServiceError> {
    let entity = source.get_category(id.clone()).await?;
    debug!(category = %id, available = entity.clues.len(), "fetched category");
    build_category(id, entity, &mut rng())
}

/// Turn a raw category into a board column of [`CLUES_PER_CATEGORY`] hidden clues.
pub fn build_category<R>(
    id: CategoryId,
    entity: CategoryEntity,
    rng: &mut R,
) -> Result<Category, ServiceError>
where
    R: Rng + ?Sized,
{
    let available = entity.clues.len();
    if available < CLUES_PER_CATEGORY {
        return Err(ServiceError::InsufficientClues {
            category: id,
            required: CLUES_PER_CATEGORY,
            available,
        });
    }

    let clues = sample(entity.clues, CLUES_PER_CATEGORY, rng)
        .into_iter()
        .map(Clue::from)
        .collect();

    Ok(Category::new(id, entity.title, clues)?)
}
