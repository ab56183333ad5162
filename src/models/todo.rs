use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};
use validator::Validate;

/// Request body for creating or replacing a todo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    /// At least 3 characters.
    #[validate(length(min = 3))]
    pub title: String,
    /// Between 3 and 100 characters.
    #[validate(length(min = 3, max = 100))]
    pub description: String,
    /// 1 (lowest) to 5 (highest).
    #[validate(range(min = 1, max = 5))]
    pub priority: i64,
    pub complete: bool,
}

/// A row of the `todos` table, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub complete: bool,
    /// Id of the user who created the todo. Recorded only; reads and writes are not scoped by it.
    pub owner_id: Option<i64>,
}

/// `{todo_id}` path segment. Ids start at 1.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoPath {
    #[validate(range(min = 1))]
    pub todo_id: i64,
}

const TODO_COLUMNS: &str = "id, title, description, priority, complete, owner_id";

impl Todo {
    pub async fn all(conn: &mut SqliteConnection) -> Result<Vec<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(&format!("SELECT {} FROM todos ORDER BY id", TODO_COLUMNS))
            .fetch_all(conn)
            .await
    }

    pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Todo>, sqlx::Error> {
        sqlx::query_as::<_, Todo>(&format!("SELECT {} FROM todos WHERE id = ?", TODO_COLUMNS))
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn insert(
        conn: &mut SqliteConnection,
        input: &TodoInput,
        owner_id: Option<i64>,
    ) -> Result<Todo, sqlx::Error> {
        sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (title, description, priority, complete, owner_id)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.priority)
        .bind(input.complete)
        .bind(owner_id)
        .fetch_one(conn)
        .await
    }

    /// Replaces every mutable field. Returns `false` when no row has `id`.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        input: &TodoInput,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?, description = ?, priority = ?, complete = ? WHERE id = ?",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.priority)
        .bind(input.complete)
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no row has `id`.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
