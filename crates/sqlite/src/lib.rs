use api::exercise::{Exercise, ExerciseFields, ExerciseId, ExerciseRepository, Unit};
use api::RepositoryError::{ConnectionError, ItemNotFoundError, QueryError};
use api::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{migrate, Acquire, Error, Row, Sqlite, SqlitePool};
use std::path::Path;
use tracing::{debug, info, instrument};

#[derive(Clone, Debug)]
pub enum DBType<'a> {
    InMemory,
    File(&'a Path),
}

#[derive(Clone, Debug)]
pub struct SqliteExerciseRepository {
    pool: SqlitePool,
}

impl SqliteExerciseRepository {
    #[instrument]
    pub async fn new(dbtype: DBType<'_>) -> RepositoryResult<Self> {
        let pool_result: Result<SqlitePool, Error> = match dbtype {
            // Every in-memory connection is its own database, so the pool is
            // pinned to one connection that is never recycled.
            DBType::InMemory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect("sqlite::memory:")
                    .await
            }
            DBType::File(f) => {
                let opts = SqliteConnectOptions::new()
                    .filename(f)
                    .create_if_missing(true)
                    .foreign_keys(true);

                SqlitePool::connect_with(opts).await
            }
        };

        match pool_result {
            Ok(p) => {
                let migrate_result = migrate!("db/migrations/exercises").run(&p).await;

                match migrate_result {
                    Ok(_) => {
                        info!("exercise store ready");
                        Ok(Self { pool: p })
                    }
                    Err(e) => Err(ConnectionError(e.to_string())),
                }
            }
            Err(e) => Err(ConnectionError(e.to_string())),
        }
    }

    /// Closes the pool. Waits for checked out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("exercise store closed");
    }

    async fn connection(&self) -> RepositoryResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| ConnectionError(e.to_string()))
    }

    fn process_query(&self, r: Result<SqliteRow, Error>) -> RepositoryResult<Exercise> {
        match r {
            Ok(r) => Self::process_row(&r).map_err(|e| QueryError(e.to_string())),
            Err(e) => match e {
                Error::RowNotFound => Err(ItemNotFoundError),
                _ => Err(QueryError(e.to_string())),
            },
        }
    }

    fn process_row(r: &SqliteRow) -> Result<Exercise, Error> {
        let unit: String = r.try_get(4)?;
        let unit = unit
            .parse::<Unit>()
            .map_err(|e| Error::Decode(Box::new(e)))?;
        Ok(Exercise {
            id: ExerciseId::new(r.try_get(0)?),
            name: r.try_get(1)?,
            reps: r.try_get(2)?,
            weight: r.try_get(3)?,
            unit,
            date: r.try_get(5)?,
        })
    }
}

#[async_trait]
impl ExerciseRepository for SqliteExerciseRepository {
    #[instrument(skip(self, fields), fields(name = fields.name))]
    async fn create(&self, fields: &ExerciseFields) -> RepositoryResult<ExerciseId> {
        let mut conn = self.connection().await?;
        let query_result = sqlx::query(
            r#"
                INSERT INTO EXERCISE (name, reps, weight, unit, date) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
        )
        .bind(&fields.name)
        .bind(fields.reps)
        .bind(fields.weight)
        .bind(fields.unit.as_str())
        .bind(&fields.date)
        .execute(&mut *conn)
        .await;

        match query_result {
            Ok(r) => Ok(ExerciseId::new(r.last_insert_rowid())),
            Err(e) => Err(RepositoryError::PersistenceError(e.to_string())),
        }
    }

    #[instrument(skip(self), fields(id = %exercise.id))]
    async fn update(&self, exercise: &Exercise) -> RepositoryResult<()> {
        let mut conn = self.connection().await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| ConnectionError(e.to_string()))?;
        let update_result = sqlx::query(
            r#"
                UPDATE EXERCISE set name = ?1, reps = ?2, weight = ?3,
                unit = ?4, date = ?5 WHERE id = ?6
                "#,
        )
        .bind(&exercise.name)
        .bind(exercise.reps)
        .bind(exercise.weight)
        .bind(exercise.unit.as_str())
        .bind(&exercise.date)
        .bind(exercise.id.value())
        .execute(&mut *tx)
        .await;

        match update_result {
            Ok(r) => {
                if r.rows_affected() == 1 {
                    let commit_result = tx.commit().await;
                    match commit_result {
                        Ok(_) => Ok(()),
                        Err(e) => Err(RepositoryError::PersistenceError(e.to_string())),
                    }
                } else {
                    let rollback_result = tx.rollback().await;
                    match rollback_result {
                        Ok(_) => Err(ItemNotFoundError),
                        Err(e) => Err(RepositoryError::PersistenceError(e.to_string())),
                    }
                }
            }
            Err(e) => Err(RepositoryError::PersistenceError(e.to_string())),
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn query_by_id(&self, id: ExerciseId) -> RepositoryResult<Exercise> {
        let mut conn = self.connection().await?;
        let query_result = sqlx::query(
            r#"
                SELECT id, name, reps, weight, unit, date
                FROM EXERCISE WHERE id = ?1
                "#,
        )
        .bind(id.value())
        .fetch_one(&mut *conn)
        .await;

        self.process_query(query_result)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Exercise>> {
        let mut conn = self.connection().await?;
        let query_result = sqlx::query(
            r#"
            SELECT id, name, reps, weight, unit, date FROM EXERCISE;
            "#,
        )
        .fetch_all(&mut *conn)
        .await;
        match query_result {
            Ok(rows) => rows
                .into_iter()
                .map(|row| self.process_query(Ok(row)))
                .collect(),
            Err(err) => Err(QueryError(err.to_string())),
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ExerciseId) -> RepositoryResult<()> {
        let mut conn = self.connection().await?;
        let delete_result = sqlx::query(
            r#"
            DELETE FROM EXERCISE WHERE id = ?1
        "#,
        )
        .bind(id.value())
        .execute(&mut *conn)
        .await;
        match delete_result {
            Ok(result) => match result.rows_affected() {
                0 => Err(ItemNotFoundError),
                1 => Ok(()),
                n => Err(RepositoryError::UnknownError(format!(
                    "{} rows were deleted for a single id",
                    n
                ))),
            },
            Err(err) => Err(RepositoryError::DeleteError(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};

    use api::RepositoryError::PersistenceError;
    use tempfile::tempdir;
    use test_log::test;

    fn db_name() -> String {
        let rand_string: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(10)
            .map(char::from)
            .collect();

        format!("testdb-{}.db3", rand_string)
    }

    fn squat() -> ExerciseFields {
        ExerciseFields {
            name: "Squat".to_string(),
            reps: 5,
            weight: 225,
            unit: Unit::Lbs,
            date: "01-15-25".to_string(),
        }
    }

    fn benchpress() -> ExerciseFields {
        ExerciseFields {
            name: "Benchpress".to_string(),
            reps: 8,
            weight: 100,
            unit: Unit::Kgs,
            date: "01-16-25".to_string(),
        }
    }

    fn deadlift() -> ExerciseFields {
        ExerciseFields {
            name: "Deadlift".to_string(),
            reps: 1,
            weight: 405,
            unit: Unit::Lbs,
            date: "01-17-25".to_string(),
        }
    }

    #[test(tokio::test)]
    async fn test_new_in_memory_connection() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory).await;
        assert!(repo.is_ok())
    }

    #[test(tokio::test)]
    async fn test_new_file_connection() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(db_name());
        let repo = SqliteExerciseRepository::new(DBType::File(file_path.as_path())).await;
        assert!(repo.is_ok());
    }

    #[test(tokio::test)]
    async fn test_bad_file_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("not-found").join(db_name());
        let repo_result = SqliteExerciseRepository::new(DBType::File(file_path.as_path())).await;
        assert!(repo_result.is_err());
        assert!(matches!(repo_result.err().unwrap(), ConnectionError(_)))
    }

    #[test(tokio::test)]
    async fn create_ok() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let result = repo.create(&squat()).await;
        assert!(result.is_ok());
        assert!(matches!(
            result,
            Ok(i) if i.value() > 0
        ))
    }

    #[test(tokio::test)]
    async fn create_and_get_ok() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(db_name());
        let repo = SqliteExerciseRepository::new(DBType::File(file_path.as_path()))
            .await
            .unwrap();

        let id = repo.create(&squat()).await.unwrap();

        let found_exercise = repo.query_by_id(id).await;
        assert!(found_exercise.is_ok());
        let ex = found_exercise.unwrap();
        assert_eq!(ex.id, id);
        assert_eq!(ex.fields(), squat());
    }

    #[test(tokio::test)]
    async fn create_rejected_by_store_constraints() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let mut bad = squat();
        bad.reps = 0;
        let result = repo.create(&bad).await;
        assert!(result.is_err());
        assert!(matches!(result.err().unwrap(), PersistenceError(_)));

        let mut bad = squat();
        bad.date = "1-2-24".to_string();
        let result = repo.create(&bad).await;
        assert!(matches!(result.err().unwrap(), PersistenceError(_)));

        let mut bad = squat();
        bad.name = "\t\r\n ".to_string();
        let result = repo.create(&bad).await;
        assert!(matches!(result.err().unwrap(), PersistenceError(_)));

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[test(tokio::test)]
    async fn query_id_not_found() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let found_exercise = repo.query_by_id(ExerciseId::new(100)).await;
        assert!(found_exercise.is_err());
        assert!(matches!(found_exercise.err().unwrap(), ItemNotFoundError));
    }

    #[test(tokio::test)]
    async fn list_ok() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let exercises = vec![squat(), benchpress(), deadlift()];
        for e in &exercises {
            repo.create(e).await.unwrap();
        }

        let found = repo.list().await.unwrap();
        assert_eq!(found.len(), 3);
        for e in exercises {
            assert!(found.iter().any(|f| f.fields() == e));
        }
    }

    #[test(tokio::test)]
    async fn list_empty_ok() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let found = repo.list().await;
        assert!(found.is_ok());
        assert!(found.unwrap().is_empty());
    }

    #[test(tokio::test)]
    async fn update_ok() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let id = repo.create(&squat()).await.unwrap();

        let mut found_ex = repo.query_by_id(id).await.unwrap();
        found_ex.name = "Front Squat".to_string();
        found_ex.reps = 3;
        found_ex.weight = 100;
        found_ex.unit = Unit::Kgs;
        found_ex.date = "02-01-25".to_string();

        let update_result = repo.update(&found_ex).await;
        assert!(update_result.is_ok());

        let updated = repo.query_by_id(id).await.unwrap();
        assert_eq!(updated, found_ex);
    }

    #[test(tokio::test)]
    async fn update_not_found() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let e = Exercise::from_fields(ExerciseId::new(1000), squat());
        let update_result = repo.update(&e).await;
        assert!(update_result.is_err());
        assert!(matches!(update_result.err().unwrap(), ItemNotFoundError));
    }

    #[test(tokio::test)]
    async fn delete_ok() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let id = repo.create(&deadlift()).await.unwrap();
        let delete_result = repo.delete(id).await;
        assert!(delete_result.is_ok());

        let query_result = repo.query_by_id(id).await;
        assert!(matches!(query_result.err().unwrap(), ItemNotFoundError));
    }

    #[test(tokio::test)]
    async fn delete_not_found_is_repeatable() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let id = repo.create(&deadlift()).await.unwrap();
        repo.delete(id).await.unwrap();

        for _ in 0..3 {
            let result = repo.delete(id).await;
            assert!(matches!(result.err().unwrap(), ItemNotFoundError));
        }
    }

    #[test(tokio::test)]
    async fn ids_are_not_reused_after_delete() {
        let repo = SqliteExerciseRepository::new(DBType::InMemory)
            .await
            .unwrap();

        let first = repo.create(&squat()).await.unwrap();
        repo.delete(first).await.unwrap();
        let second = repo.create(&squat()).await.unwrap();
        assert_ne!(first, second);
    }

    #[test(tokio::test)]
    async fn data_survives_reopen() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(db_name());
        let repo = SqliteExerciseRepository::new(DBType::File(file_path.as_path()))
            .await
            .unwrap();
        let id = repo.create(&benchpress()).await.unwrap();
        repo.close().await;

        let reopened = SqliteExerciseRepository::new(DBType::File(file_path.as_path()))
            .await
            .unwrap();
        let found = reopened.query_by_id(id).await.unwrap();
        assert_eq!(found.fields(), benchpress());
    }
}
