use crate::exercise::error;
use crate::repository::ExerciseRepository;
use crate::{Exercise, ExerciseError, ExerciseFields, ExerciseId, RepositoryError};
use async_trait::async_trait;
use error::ExerciseResult;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// The exercise log operations. Callers pass fields that already went
/// through [`crate::validation`]; the manager only talks to the repository.
#[async_trait]
pub trait ExerciseManagement {
    async fn create(&self, fields: ExerciseFields) -> ExerciseResult<Exercise>;

    async fn list(&self) -> ExerciseResult<Vec<Exercise>>;

    async fn get_by_id(&self, id: ExerciseId) -> ExerciseResult<Exercise>;

    // Replaces all five fields, the id is kept
    async fn update(&self, id: ExerciseId, fields: ExerciseFields) -> ExerciseResult<Exercise>;

    async fn delete(&self, id: ExerciseId) -> ExerciseResult<()>;
}

#[derive(Debug)]
pub struct ExerciseManager<T: ExerciseRepository> {
    repo: Arc<T>,
}

impl<T: ExerciseRepository> Clone for ExerciseManager<T> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<T: ExerciseRepository> ExerciseManager<T> {
    pub fn new(repo: Arc<T>) -> ExerciseResult<Self> {
        Ok(Self { repo })
    }

    fn save_error(err: RepositoryError) -> ExerciseError {
        match err {
            RepositoryError::PersistenceError(e) => {
                error!("{}", e);
                ExerciseError::SaveFailed
            }
            RepositoryError::ItemNotFoundError => {
                debug!("exercise not found");
                ExerciseError::ExerciseNotFoundError
            }
            e => {
                error!("{}", e.to_string());
                ExerciseError::UnknownError
            }
        }
    }
}

#[async_trait]
impl<T: ExerciseRepository + Send + Sync> ExerciseManagement for ExerciseManager<T> {
    /// # Returns
    /// * the stored exercise, carrying the id assigned by the repository
    /// * [`ExerciseError::SaveFailed`] if the repository rejects the record
    /// * [`ExerciseError::UnknownError`] for any other repository problem
    #[instrument(skip(self, fields), fields(name = fields.name))]
    async fn create(&self, fields: ExerciseFields) -> ExerciseResult<Exercise> {
        match self.repo.create(&fields).await {
            Ok(id) => {
                debug!("received id {} from repository", &id);
                Ok(Exercise::from_fields(id, fields))
            }
            Err(err) => Err(Self::save_error(err)),
        }
    }

    ///Retrieves every exercise, in whatever order the repository returns them
    ///
    ///# Returns
    ///* [`Ok`]` with the list of exercises, possibly empty
    ///* [`ExerciseError::LookupError`] if there is a problem retrieving the list
    #[instrument(skip(self))]
    async fn list(&self) -> ExerciseResult<Vec<Exercise>> {
        match self.repo.list().await {
            Ok(exercises) => {
                debug!("found {} exercises", exercises.len());
                Ok(exercises)
            }
            Err(err) => {
                error!("{}", err.to_string());
                Err(ExerciseError::LookupError)
            }
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ExerciseId) -> ExerciseResult<Exercise> {
        match self.repo.query_by_id(id).await {
            Ok(e) => {
                debug!("exercise found");
                Ok(e)
            }
            Err(err) => match err {
                RepositoryError::ItemNotFoundError => {
                    debug!("exercise not found");
                    Err(ExerciseError::ExerciseNotFoundError)
                }
                RepositoryError::ConnectionError(e) => {
                    //log the backend error message
                    error!("{}", e);
                    Err(ExerciseError::LookupError)
                }
                err => {
                    error!("{}", err.to_string());
                    Err(ExerciseError::LookupError)
                }
            },
        }
    }

    /// # Returns
    /// * the exercise as it is now stored
    /// * [`ExerciseError::ExerciseNotFoundError`] if no exercise has the id
    /// * [`ExerciseError::SaveFailed`] if the repository rejects the record
    /// * [`ExerciseError::UnknownError`] for any other repository problem
    #[instrument(skip(self, fields), fields(id = %id, name = fields.name))]
    async fn update(&self, id: ExerciseId, fields: ExerciseFields) -> ExerciseResult<Exercise> {
        // No existence check first, the repository reports a missing row itself
        let exercise = Exercise::from_fields(id, fields);
        match self.repo.update(&exercise).await {
            Ok(_) => {
                debug!("update to exercise was successful");
                Ok(exercise)
            }
            Err(err) => Err(Self::save_error(err)),
        }
    }

    ///Deletes the exercise from the repository
    /// # Returns
    /// * [`Ok`] if the deletion was successful
    /// * [`ExerciseError::ExerciseNotFoundError`] if the exercise was not found
    /// * [`ExerciseError::DeleteFailed`] if there was a problem deleting the exercise
    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ExerciseId) -> ExerciseResult<()> {
        match self.repo.delete(id).await {
            Ok(_) => Ok(()),
            Err(RepositoryError::ItemNotFoundError) => {
                debug!("exercise was not found");
                Err(ExerciseError::ExerciseNotFoundError)
            }
            Err(err) => {
                error!("{}", err.to_string());
                Err(ExerciseError::DeleteFailed)
            }
        }
    }
}
