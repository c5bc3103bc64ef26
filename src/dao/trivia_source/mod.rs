pub mod jservice;
#[cfg(test)]
pub mod memory;

use futures::future::BoxFuture;

use crate::dao::models::{CategoryEntity, CategorySummaryEntity};
use crate::dao::source::SourceResult;
use crate::state::board::CategoryId;

/// Abstraction over the trivia API the board is filled from.
pub trait TriviaSource: Send + Sync {
    /// Request up to `count` candidate categories.
    fn list_categories(
        &self,
        count: usize,
    ) -> BoxFuture<'static, SourceResult<Vec<CategorySummaryEntity>>>;
    /// Request the title and full clue list of one category.
    fn get_category(&self, id: CategoryId) -> BoxFuture<'static, SourceResult<CategoryEntity>>;
}
