//! PostgreSQL schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// Creates the `tasks` table and its listing index if they are missing.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_tasks_created_at_id ON tasks (created_at DESC, id DESC);
"#;

pub const INSERT_TASK: &str = "INSERT INTO tasks (title, description, completed) \
     VALUES ($1, $2, $3) \
     RETURNING id, title, description, completed, created_at";

pub const SELECT_TASK: &str =
    "SELECT id, title, description, completed, created_at FROM tasks WHERE id = $1";

/// Ties on `created_at` fall back to `id` so the order is deterministic.
pub const LIST_TASKS: &str = "SELECT id, title, description, completed, created_at \
     FROM tasks ORDER BY created_at DESC, id DESC";

pub const UPDATE_TASK: &str = "UPDATE tasks SET title = $1, description = $2, completed = $3 \
     WHERE id = $4 \
     RETURNING id, title, description, completed, created_at";

pub const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = $1 RETURNING id";

pub const PING: &str = "SELECT 1";
