pub type ExerciseResult<T, E = ExerciseError> = Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise was not found")]
    ExerciseNotFoundError,

    #[error("exercise lookup failed")]
    LookupError,

    #[error("exercise could not be saved")]
    SaveFailed,

    #[error("exercise could not be deleted")]
    DeleteFailed,

    #[error("unknown exercise error")]
    UnknownError,
}

pub type RepositoryResult<T, E = RepositoryError> = Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RepositoryError {
    #[error("PersistenceError: {0}")]
    PersistenceError(String),

    #[error("ConnectionError: {0}")]
    ConnectionError(String),

    #[error("QueryError: {0}")]
    QueryError(String),

    #[error("DeleteError: {0}")]
    DeleteError(String),

    #[error("ItemNotFoundError")]
    ItemNotFoundError,

    #[error("Unknown: {0}")]
    UnknownError(String),
}
