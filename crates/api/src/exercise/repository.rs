use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{Exercise, ExerciseFields, ExerciseId, RepositoryResult};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExerciseRepository {
    /// Persists a new exercise.
    /// Will return the repository generated ID.
    /// RepositoryError will be a PersistenceError if the store rejects the record
    async fn create(&self, fields: &ExerciseFields) -> RepositoryResult<ExerciseId>;

    /// Replaces every field of the stored exercise with the same id.
    /// Will return an ItemNotFoundError if the item does not exist
    async fn update(&self, exercise: &Exercise) -> RepositoryResult<()>;

    // Will return an ItemNotFoundError if the item does not exist
    async fn query_by_id(&self, id: ExerciseId) -> RepositoryResult<Exercise>;

    // No ordering is promised
    async fn list(&self) -> RepositoryResult<Vec<Exercise>>;

    /// Deletes an exercise from the repository
    /// Will return an ItemNotFoundError if the item does not exist
    async fn delete(&self, id: ExerciseId) -> RepositoryResult<()>;
}
