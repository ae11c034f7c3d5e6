//! Store adapter over Postgres.
//!
//! Handlers never touch the pool directly; they go through `Store`, which
//! exposes the find-by-field / insert / update-if-exists / delete-if-exists
//! operations the service needs. Update and delete are single statements, so
//! the check-then-act happens atomically inside the database and the core
//! carries no locking or retry logic of its own.

use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Credential, Task, TaskInput, UserView};

pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Opens a connection pool. Called once at process start.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Builds a pool without connecting; connections are established on first
    /// use. Lets request paths that reject before reaching the store run
    /// without a database.
    pub fn connect_lazy(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Closes the pool. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, AppError> {
        let credential = sqlx::query_as::<_, Credential>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    pub async fn insert_credential(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserView, AppError> {
        let user = sqlx::query_as::<_, UserView>(
            "INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3) RETURNING id, email",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, created_at, updated_at FROM tasks \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, created_at, updated_at FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        let created = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, description, created_at, updated_at",
        )
        .bind(task.id)
        .bind(task.title)
        .bind(task.description)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Updates a task if it exists. `None` means no matching record.
    pub async fn update_task(
        &self,
        id: Uuid,
        input: TaskInput,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = $1, description = $2, updated_at = NOW() \
             WHERE id = $3 \
             RETURNING id, title, description, created_at, updated_at",
        )
        .bind(input.title)
        .bind(input.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task if it exists; reports whether a record was removed.
    pub async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
