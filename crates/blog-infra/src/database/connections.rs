use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{DbConn, SqlxPostgresConnector};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, Connector, PostRepository, Session, UserRepository};

use super::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Connection settings for the blog database.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub connect_timeout: Duration,
}

// Keep the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Opens one dedicated connection per call - nothing is shared between requests.
///
/// # Example
/// ```ignore
/// let connector = PostgresConnector::new(&config);
/// let session = connector.connect().await?;
/// let users = session.users().list().await?;
/// // connection closes when `session` is dropped
/// ```
#[derive(Clone)]
pub struct PostgresConnector {
    options: PgConnectOptions,
    connect_timeout: Duration,
}

impl PostgresConnector {
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        Self {
            options,
            connect_timeout: config.connect_timeout,
        }
    }

    /// Open a raw single-connection handle.
    pub async fn open(&self) -> Result<DbConn, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .min_connections(0)
            .acquire_timeout(self.connect_timeout)
            .connect_with(self.options.clone())
            .await?;

        Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
    }
}

#[async_trait]
impl Connector for PostgresConnector {
    async fn connect(&self) -> Result<Box<dyn Session>, RepoError> {
        let conn = self
            .open()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        Ok(Box::new(PostgresSession::new(conn)))
    }
}

/// The three repositories sharing one connection.
pub struct PostgresSession {
    users: PostgresUserRepository,
    posts: PostgresPostRepository,
    comments: PostgresCommentRepository,
}

impl PostgresSession {
    pub fn new(conn: DbConn) -> Self {
        let conn = Arc::new(conn);
        Self {
            users: PostgresUserRepository::new(Arc::clone(&conn)),
            posts: PostgresPostRepository::new(Arc::clone(&conn)),
            comments: PostgresCommentRepository::new(conn),
        }
    }
}

impl Session for PostgresSession {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn posts(&self) -> &dyn PostRepository {
        &self.posts
    }

    fn comments(&self) -> &dyn CommentRepository {
        &self.comments
    }
}
