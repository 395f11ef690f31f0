use crate::domain::ports::{DbServer, SqlSession};
use crate::utils::error::{Result, RunnerError};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Executor};

/// Server-level access over sqlx. Each server operation opens a short
/// connection without selecting a database, as `SHOW DATABASES` and
/// `CREATE DATABASE` must run outside the target schema.
pub struct MySqlServer {
    options: MySqlConnectOptions,
}

impl MySqlServer {
    pub fn new(host: &str, user: &str, password: &str) -> Self {
        let options = MySqlConnectOptions::new()
            .host(host)
            .username(user)
            .password(password);
        Self { options }
    }

    async fn connect_server(&self) -> Result<MySqlConnection> {
        self.options
            .connect()
            .await
            .map_err(|e| RunnerError::ConnectError {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl DbServer for MySqlServer {
    type Session = MySqlSession;

    async fn ping(&self) -> Result<()> {
        let conn = self.connect_server().await?;
        conn.close().await?;
        Ok(())
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        let mut conn = self.connect_server().await?;
        let names: Vec<String> = sqlx::query_scalar("SHOW DATABASES")
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;
        Ok(names)
    }

    async fn create_database(&self, name: &str) -> Result<()> {
        let mut conn = self.connect_server().await?;
        let statement = format!(
            "CREATE DATABASE `{}` CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci",
            name
        );
        let result = conn.execute(statement.as_str()).await;
        let _ = conn.close().await;

        result.map_err(|e| RunnerError::DatabaseCreateError {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn connect(&self, database: &str) -> Result<MySqlSession> {
        let conn = self
            .options
            .clone()
            .database(database)
            .connect()
            .await
            .map_err(|e| RunnerError::ConnectError {
                message: e.to_string(),
            })?;
        Ok(MySqlSession { conn })
    }
}

/// One connection scoped to the target database, reused for every script
/// in a run. Commit discipline is driven by the executor through raw
/// statements, matching the session semantics the scripts expect.
pub struct MySqlSession {
    conn: MySqlConnection,
}

#[async_trait]
impl SqlSession for MySqlSession {
    async fn execute(&mut self, statement: &str) -> Result<()> {
        self.conn.execute(statement).await?;
        Ok(())
    }

    async fn set_autocommit(&mut self, enabled: bool) -> Result<()> {
        let statement = if enabled {
            "SET autocommit = 1"
        } else {
            "SET autocommit = 0"
        };
        self.conn.execute(statement).await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.conn.execute("COMMIT").await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.conn.execute("ROLLBACK").await?;
        Ok(())
    }
}
