use crate::types::{AppError, Result, TaskStatus};
use chrono::Utc;
use libsql::{Builder, Connection, Database};

pub struct Store {
    db: Database,
}

impl Store {
    /// Open an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    /// Open (or create) a file-backed SQLite database.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let store = Self { db };
        store.initialize_schema().await?;

        Ok(store)
    }

    pub fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        // Accounts table. No uniqueness constraint on email: repeated
        // seeding legally inserts duplicate accounts.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                secret_hash TEXT NOT NULL,
                roles TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create accounts table: {}", e)))?;

        // Tasks table. owner_id is a weak reference without a foreign key;
        // a task may outlive its account.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                status TEXT NOT NULL,
                owner_id TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create tasks table: {}", e)))?;

        Ok(())
    }

    // Account operations

    pub async fn create_account(
        &self,
        id: &str,
        email: &str,
        secret_hash: &str,
        roles: &[String],
    ) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();
        let roles_json = serde_json::to_string(roles)
            .map_err(|e| AppError::Database(format!("Failed to encode roles: {}", e)))?;

        conn.execute(
            "INSERT INTO accounts (id, email, secret_hash, roles, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (id, email, secret_hash, roles_json, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create account: {}", e)))?;

        Ok(())
    }

    /// Resolve an email to exactly one account (case-sensitive exact match).
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, email, secret_hash, roles, created_at
                 FROM accounts WHERE email = ? LIMIT 1",
                [email],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query account: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(Account::from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, email, secret_hash, roles, created_at
                 FROM accounts WHERE id = ? LIMIT 1",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query account: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(Account::from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    // Task operations

    pub async fn create_task(
        &self,
        id: &str,
        title: &str,
        status: TaskStatus,
        owner_id: &str,
    ) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO tasks (id, title, status, owner_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (id, title, status.as_str(), owner_id, now, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create task: {}", e)))?;

        Ok(())
    }

    pub async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, title, status, owner_id, created_at, updated_at
                 FROM tasks WHERE id = ? LIMIT 1",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query task: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(Task::from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    /// List all tasks with their owner joined in. A dangling owner
    /// reference yields `owner: None`.
    pub async fn list_tasks(&self) -> Result<Vec<TaskWithOwner>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT t.id, t.title, t.status, t.owner_id, t.created_at, t.updated_at,
                        a.id, a.email, a.roles
                 FROM tasks t
                 LEFT JOIN accounts a ON a.id = t.owner_id
                 ORDER BY t.created_at ASC, t.id ASC",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query tasks: {}", e)))?;

        let mut tasks = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            let task = Task::from_row(&row)?;

            let owner_id: Option<String> =
                row.get(6).map_err(|e| AppError::Database(e.to_string()))?;
            let owner = match owner_id {
                Some(id) => {
                    let email: String =
                        row.get(7).map_err(|e| AppError::Database(e.to_string()))?;
                    let roles_json: String =
                        row.get(8).map_err(|e| AppError::Database(e.to_string()))?;
                    Some(TaskOwner {
                        id,
                        email,
                        roles: decode_roles(&roles_json),
                    })
                }
                None => None,
            };

            tasks.push(TaskWithOwner { task, owner });
        }

        Ok(tasks)
    }

    /// Partial update; unset fields keep their stored values. Returns the
    /// number of rows changed (0 when the id is unknown).
    pub async fn update_task(
        &self,
        id: &str,
        title: Option<&str>,
        status: Option<TaskStatus>,
    ) -> Result<u64> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let affected = conn
            .execute(
                "UPDATE tasks
                 SET title = COALESCE(?, title),
                     status = COALESCE(?, status),
                     updated_at = ?
                 WHERE id = ?",
                (title, status.map(|s| s.as_str()), now, id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update task: {}", e)))?;

        Ok(affected)
    }

    /// Returns the number of rows deleted (0 when the id is unknown).
    pub async fn delete_task(&self, id: &str) -> Result<u64> {
        let conn = self.connection()?;

        let affected = conn
            .execute("DELETE FROM tasks WHERE id = ?", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete task: {}", e)))?;

        Ok(affected)
    }
}

fn decode_roles(roles_json: &str) -> Vec<String> {
    serde_json::from_str(roles_json).unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub secret_hash: String,
    pub roles: Vec<String>,
    pub created_at: i64,
}

impl Account {
    fn from_row(row: &libsql::Row) -> Result<Self> {
        let roles_json: String = row.get(3).map_err(|e| AppError::Database(e.to_string()))?;
        Ok(Account {
            id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
            email: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
            secret_hash: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            roles: decode_roles(&roles_json),
            created_at: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub owner_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Task {
    fn from_row(row: &libsql::Row) -> Result<Self> {
        let status: String = row.get(2).map_err(|e| AppError::Database(e.to_string()))?;
        Ok(Task {
            id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
            status: TaskStatus::from_str_or_default(&status),
            owner_id: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
            created_at: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
            updated_at: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
        })
    }
}

/// Owner columns carried by the task list join.
#[derive(Debug, Clone)]
pub struct TaskOwner {
    pub id: String,
    pub email: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TaskWithOwner {
    pub task: Task,
    pub owner: Option<TaskOwner>,
}
