//! Database layer for local SQLite storage.
//!
//! This module handles:
//! - Connection pool management with WAL mode
//! - Schema migrations, including the flattened renderer columns
//! - Widget row queries

pub mod pool;
pub mod widgets;

pub use pool::{DbPool, StoreConfig};

use crate::models::widget_row::flattened_column_types;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Database-related errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Migrations applied in order, each recorded once in `_migrations`.
const MIGRATIONS: &[(&str, &str)] = &[(
    "0001_initial_schema",
    include_str!("migrations/0001_initial_schema.sql"),
)];

/// Get the path to the SQLite database file inside `data_dir`.
pub fn get_db_path(data_dir: &Path, config: &StoreConfig) -> PathBuf {
    data_dir.join(&config.database_file)
}

/// Initialize the database: create the file if needed and run migrations.
pub async fn initialize(db_path: &Path, config: &StoreConfig) -> Result<DbPool, DbError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            DbError::Migration(format!("Failed to create database directory: {}", e))
        })?;
    }

    let pool = pool::create_pool(db_path, config).await?;

    run_migrations(&pool).await?;
    ensure_flattened_columns(&pool).await?;

    Ok(pool)
}

/// Run all pending database migrations.
async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    for (name, sql) in MIGRATIONS {
        let applied: Option<(i64,)> = sqlx::query_as("SELECT id FROM _migrations WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        if applied.is_some() {
            continue;
        }

        for statement in parse_sql_statements(sql) {
            sqlx::query(&statement).execute(&mut *conn).await.map_err(|e| {
                DbError::Migration(format!("{} failed: {}", name, e))
            })?;
        }

        sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
            .bind(name)
            .execute(&mut *conn)
            .await?;

        log::info!("[store] Applied migration {}", name);
    }

    Ok(())
}

/// Add any flattened `design`/`display` column the `widgets` table lacks.
///
/// The column list comes from the default configuration, so a new schema
/// field gets its column on the next start without a hand-written migration.
/// Existing columns are never altered or dropped.
async fn ensure_flattened_columns(pool: &DbPool) -> Result<(), DbError> {
    let existing: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('widgets')")
        .fetch_all(pool)
        .await?;
    let existing: HashSet<String> = existing.into_iter().map(|(name,)| name).collect();

    let mut added = 0;
    for (column, sql_type) in flattened_column_types() {
        if existing.contains(&column) {
            continue;
        }
        let statement = format!("ALTER TABLE widgets ADD COLUMN \"{}\" {}", column, sql_type);
        sqlx::query(&statement).execute(pool).await.map_err(|e| {
            DbError::Migration(format!("Failed to add column {}: {}", column, e))
        })?;
        added += 1;
    }

    if added > 0 {
        log::info!("[store] Added {} flattened widget columns", added);
    }

    Ok(())
}

/// Split a migration file into statements.
///
/// Skips `--` comments and ignores semicolons nested inside parentheses.
fn parse_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current_statement = String::new();
    let mut paren_depth: i32 = 0;

    for line in sql.lines() {
        let line = match line.find("--") {
            Some(idx) => &line[..idx],
            None => line,
        };

        for ch in line.chars() {
            match ch {
                '(' => {
                    paren_depth += 1;
                    current_statement.push(ch);
                }
                ')' => {
                    paren_depth = (paren_depth - 1).max(0);
                    current_statement.push(ch);
                }
                ';' if paren_depth == 0 => {
                    let stmt = current_statement.trim().to_string();
                    if !stmt.is_empty() {
                        statements.push(stmt);
                    }
                    current_statement.clear();
                }
                _ => current_statement.push(ch),
            }
        }

        if !current_statement.is_empty() {
            current_statement.push(' ');
        }
    }

    let final_stmt = current_statement.trim().to_string();
    if !final_stmt.is_empty() {
        statements.push(final_stmt);
    }

    statements
}
