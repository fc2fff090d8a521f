//! Database queries for widget rows.
//!
//! Every write carries both representations of the configuration: the nested
//! `config` JSON and the flattened `design`/`display` columns.

use crate::models::widget_config::WidgetConfiguration;
use crate::models::widget_row::{FlatValue, WidgetRow};
use serde::Serialize;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

const ROW_COLUMNS: &str =
    "id, site_id, name, type, is_active, version, created_at, updated_at, config";

/// Everything written for one widget.
pub struct WidgetWrite<'a> {
    pub config: &'a WidgetConfiguration,
    /// Serialized nested blob.
    pub blob: String,
    pub flattened: Vec<(String, FlatValue)>,
}

/// Dashboard list entry.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSummary {
    pub id: String,
    pub name: String,
    #[sqlx(rename = "type")]
    pub widget_type: String,
    pub is_active: bool,
    pub version: i64,
    pub updated_at: i64,
}

fn bind_flat<'q>(query: SqliteQuery<'q>, value: &FlatValue) -> SqliteQuery<'q> {
    match value {
        FlatValue::Bool(b) => query.bind(*b),
        FlatValue::Integer(i) => query.bind(*i),
        FlatValue::Real(f) => query.bind(*f),
        FlatValue::Text(s) => query.bind(s.clone()),
        FlatValue::Null => query.bind(None::<String>),
    }
}

/// Fetch one widget row by id.
pub async fn fetch_widget(pool: &SqlitePool, id: &str) -> Result<Option<WidgetRow>, sqlx::Error> {
    let sql = format!("SELECT {} FROM widgets WHERE id = ?", ROW_COLUMNS);
    sqlx::query_as::<_, WidgetRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a new widget row.
pub async fn insert_widget(pool: &SqlitePool, write: &WidgetWrite<'_>) -> Result<(), sqlx::Error> {
    let mut columns = vec![
        "id", "site_id", "name", "type", "is_active", "version", "created_at", "updated_at",
        "config",
    ]
    .into_iter()
    .map(|c| c.to_string())
    .collect::<Vec<_>>();
    columns.extend(write.flattened.iter().map(|(name, _)| format!("\"{}\"", name)));

    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO widgets ({}) VALUES ({})",
        columns.join(", "),
        placeholders
    );

    let config = write.config;
    let mut query = sqlx::query(&sql)
        .bind(&config.id)
        .bind(&config.site_id)
        .bind(&config.name)
        .bind(&config.widget_type)
        .bind(config.is_active)
        .bind(config.version)
        .bind(config.created_at)
        .bind(config.updated_at)
        .bind(&write.blob);
    for (_, value) in &write.flattened {
        query = bind_flat(query, value);
    }

    query.execute(pool).await?;
    Ok(())
}

/// Overwrite a widget row. Returns `false` when no row has `config.id`.
///
/// No version check is made: the last write wins.
pub async fn update_widget(pool: &SqlitePool, write: &WidgetWrite<'_>) -> Result<bool, sqlx::Error> {
    let mut sets: Vec<String> = [
        "site_id",
        "name",
        "type",
        "is_active",
        "version",
        "updated_at",
        "config",
    ]
        .iter()
        .map(|c| format!("{} = ?", c))
        .collect();
    sets.extend(write.flattened.iter().map(|(name, _)| format!("\"{}\" = ?", name)));

    let sql = format!("UPDATE widgets SET {} WHERE id = ?", sets.join(", "));

    let config = write.config;
    let mut query = sqlx::query(&sql)
        .bind(&config.site_id)
        .bind(&config.name)
        .bind(&config.widget_type)
        .bind(config.is_active)
        .bind(config.version)
        .bind(config.updated_at)
        .bind(&write.blob);
    for (_, value) in &write.flattened {
        query = bind_flat(query, value);
    }
    query = query.bind(&config.id);

    let result = query.execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a widget row. Returns `false` when nothing was deleted.
pub async fn delete_widget(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM widgets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Widgets owned by `site_id`, most recently updated first.
pub async fn list_widgets_for_site(
    pool: &SqlitePool,
    site_id: &str,
) -> Result<Vec<WidgetSummary>, sqlx::Error> {
    sqlx::query_as::<_, WidgetSummary>(
        r#"
        SELECT id, name, type, is_active, version, updated_at
        FROM widgets
        WHERE site_id = ?
        ORDER BY updated_at DESC, name ASC
        "#,
    )
    .bind(site_id)
    .fetch_all(pool)
    .await
}

/// Read a value back from a flattened column, typed by its declared kind.
fn read_flat(row: &SqliteRow, name: &str, kind: &FlatValue) -> Result<FlatValue, sqlx::Error> {
    let value = match kind {
        FlatValue::Bool(_) => row.try_get::<Option<bool>, _>(name)?.map(FlatValue::Bool),
        FlatValue::Integer(_) => row.try_get::<Option<i64>, _>(name)?.map(FlatValue::Integer),
        FlatValue::Real(_) => row.try_get::<Option<f64>, _>(name)?.map(FlatValue::Real),
        FlatValue::Text(_) | FlatValue::Null => {
            row.try_get::<Option<String>, _>(name)?.map(FlatValue::Text)
        }
    };
    Ok(value.unwrap_or(FlatValue::Null))
}

/// Read the flattened columns of one widget as the external renderer sees them.
///
/// `kinds` gives each column's expected value kind, in output order.
pub async fn fetch_flattened_columns(
    pool: &SqlitePool,
    id: &str,
    kinds: &[(String, FlatValue)],
) -> Result<Option<Vec<(String, FlatValue)>>, sqlx::Error> {
    if kinds.is_empty() {
        return Ok(Some(Vec::new()));
    }

    let columns = kinds
        .iter()
        .map(|(name, _)| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("SELECT {} FROM widgets WHERE id = ?", columns);

    let Some(row) = sqlx::query(&sql).bind(id).fetch_optional(pool).await? else {
        return Ok(None);
    };

    let mut values = Vec::with_capacity(kinds.len());
    for (name, kind) in kinds {
        values.push((name.clone(), read_flat(&row, name, kind)?));
    }
    Ok(Some(values))
}
