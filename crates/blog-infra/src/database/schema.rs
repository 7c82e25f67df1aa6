//! One-shot schema bootstrap.
//!
//! The database may come up after the API process (typical for multi-container
//! deployments), so [`initialize`] keeps trying to connect with a fixed backoff
//! and applies the schema script on the first successful connection. Every
//! statement in the script must be idempotent (`CREATE TABLE IF NOT EXISTS`).

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sea_orm::{ConnectionTrait, DbConn, DbErr, TransactionTrait};
use thiserror::Error;

const EMBEDDED_SCHEMA: &str = include_str!("../../sql/init.sql");

/// Statement terminator used to split the script.
const TERMINATOR: char = ';';

/// Schema-definition script.
#[derive(Debug, Clone)]
pub struct SchemaScript {
    sql: String,
}

impl SchemaScript {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }

    /// The script compiled into the binary (`sql/init.sql`).
    pub fn embedded() -> Self {
        Self::new(EMBEDDED_SCHEMA)
    }

    /// Load an override script from disk.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, InitError> {
        let path = path.as_ref();
        let sql = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| InitError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::new(sql))
    }

    /// Individual statements in script order, trimmed, empty pieces skipped.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.sql
            .split(TERMINATOR)
            .map(str::trim)
            .filter(|statement| !statement.is_empty())
    }
}

/// Bounded retry with a fixed pause between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("Failed to read schema script {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database not ready after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Execute every statement of `script` in one transaction.
///
/// Returns the number of statements executed.
pub async fn apply_schema(conn: &DbConn, script: &SchemaScript) -> Result<usize, DbErr> {
    let txn = conn.begin().await?;

    let mut applied = 0;
    for statement in script.statements() {
        txn.execute_unprepared(statement).await?;
        applied += 1;
    }

    txn.commit().await?;
    Ok(applied)
}

/// Connect and apply the schema, retrying per `policy`.
///
/// Each attempt gets a fresh connection from `open`, which is closed again
/// before returning. Any connection or statement failure counts as a failed
/// attempt.
pub async fn initialize<F, Fut, E>(
    mut open: F,
    script: &SchemaScript,
    policy: &RetryPolicy,
) -> Result<(), InitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<DbConn, E>>,
    E: fmt::Display,
{
    for attempt in 1..=policy.max_attempts {
        let outcome = match open().await {
            Ok(conn) => {
                let applied = apply_schema(&conn, script).await;
                if let Err(e) = conn.close().await {
                    tracing::warn!(error = %e, "Failed to close schema connection");
                }
                applied.map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(statements) => {
                tracing::info!(attempt, statements, "Database schema applied");
                return Ok(());
            }
            Err(error) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    %error,
                    "Database not ready"
                );
                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.backoff).await;
                }
            }
        }
    }

    Err(InitError::Exhausted {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }

    fn schema_connection(statements: usize) -> DbConn {
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(
                (0..statements)
                    .map(|_| MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    })
                    .collect::<Vec<_>>(),
            )
            .into_connection()
    }

    #[test]
    fn test_statements_are_trimmed_and_non_empty() {
        let script = SchemaScript::new("  CREATE TABLE a (id INT);\n\n;CREATE TABLE b (id INT)  ;\n");

        let statements: Vec<&str> = script.statements().collect();

        assert_eq!(
            statements,
            vec!["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]
        );
    }

    #[test]
    fn test_embedded_script_is_idempotent() {
        let script = SchemaScript::embedded();
        let statements: Vec<&str> = script.statements().collect();

        assert_eq!(statements.len(), 3);
        assert!(
            statements
                .iter()
                .all(|s| s.starts_with("CREATE TABLE IF NOT EXISTS"))
        );
    }

    #[tokio::test]
    async fn test_apply_schema_runs_every_statement() {
        let script = SchemaScript::embedded();
        let conn = schema_connection(3);

        let applied = apply_schema(&conn, &script).await.unwrap();

        assert_eq!(applied, 3);
    }

    #[tokio::test]
    async fn test_initialize_retries_until_connected() {
        let script = SchemaScript::embedded();
        let mut attempts = 0;

        let result = initialize(
            || {
                attempts += 1;
                let outcome = if attempts < 3 {
                    Err("connection refused")
                } else {
                    Ok(schema_connection(3))
                };
                async move { outcome }
            },
            &script,
            &fast_policy(5),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_initialize_gives_up_after_max_attempts() {
        let script = SchemaScript::embedded();
        let mut attempts = 0;

        let result = initialize(
            || {
                attempts += 1;
                async { Err::<DbConn, _>("connection refused") }
            },
            &script,
            &fast_policy(4),
        )
        .await;

        assert!(matches!(result, Err(InitError::Exhausted { attempts: 4 })));
        assert_eq!(attempts, 4);
    }

    #[tokio::test]
    async fn test_missing_script_file_is_reported() {
        let result = SchemaScript::from_file("/nonexistent/init.sql").await;

        assert!(matches!(result, Err(InitError::Read { .. })));
    }
}
