//! Stored row shape of a widget and the flattened column projection.
//!
//! The `config` column holds the nested JSON and is the source of truth for
//! the dashboard. The flattened columns duplicate every leaf of `design` and
//! `display` for the on-site renderer, which reads scalar columns only.
//! Business logic never reads the flattened form.

use crate::models::merge::Settings;
use crate::models::widget_config::{PartialWidgetConfig, WidgetConfiguration};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::sync::OnceLock;

/// A widget row as read from the `widgets` table (flattened columns excluded).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WidgetRow {
    pub id: String,
    pub site_id: Option<String>,
    pub name: String,
    #[sqlx(rename = "type")]
    pub widget_type: String,
    pub is_active: bool,
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
    /// Nested JSON blob.
    pub config: String,
}

impl WidgetRow {
    /// The parsed `config` column.
    pub fn config_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.config)
    }

    /// Rebuild a partial configuration from the blob plus the row columns.
    ///
    /// Row columns win over anything the blob may carry under the same keys.
    /// A blob that is not valid JSON is treated as empty.
    pub fn to_partial(&self) -> PartialWidgetConfig {
        let blob = match self.config_value() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("[store] Widget {} has unreadable config JSON: {}", self.id, e);
                Value::Object(Map::new())
            }
        };

        let mut partial = WidgetConfiguration::partial_from_value(&blob);
        partial.id = Some(self.id.clone());
        partial.site_id = self.site_id.clone();
        partial.name = Some(self.name.clone());
        partial.widget_type = Some(self.widget_type.clone());
        partial.is_active = Some(self.is_active);
        partial.version = Some(self.version);
        partial.created_at = Some(self.created_at);
        partial.updated_at = Some(self.updated_at);
        partial
    }
}

/// A scalar value destined for one flattened column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Null,
}

impl FlatValue {
    /// SQLite column type used when the column is created.
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Bool(_) => "BOOLEAN",
            Self::Integer(_) => "INTEGER",
            Self::Real(_) => "REAL",
            Self::Text(_) | Self::Null => "TEXT",
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Real(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::Text(s.clone()),
            // Lists are stored as JSON text.
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

/// `borderLeftAccent` -> `border_left_accent`.
pub fn column_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Walk `value` along the shape of `schema`, so keys the schema does not
/// know (carried in a group's `extra`) never become columns.
fn collect_leaves(schema: &Value, value: &Value, out: &mut Vec<(String, FlatValue)>) {
    let Value::Object(fields) = schema else {
        return;
    };
    for (key, schema_child) in fields {
        let child = value.get(key).unwrap_or(&Value::Null);
        match schema_child {
            Value::Object(_) => collect_leaves(schema_child, child, out),
            _ => out.push((column_name(key), FlatValue::from_json(child))),
        }
    }
}

/// JSON shape of the default `design` and `display` groups.
fn flattened_schema() -> &'static [Value; 2] {
    static SCHEMA: OnceLock<[Value; 2]> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let defaults = WidgetConfiguration::default();
        [group_value(&defaults.design), group_value(&defaults.display)]
    })
}

// Settings groups always serialize; an error here would mean a non-string map key.
fn group_value<T: Serialize>(group: &T) -> Value {
    serde_json::to_value(group).unwrap_or(Value::Null)
}

/// Project every `design.*` and `display.*` leaf onto its flattened column.
///
/// Column names are the snake_case leaf key; the column set is therefore
/// derived from the schema itself and cannot drift from it.
pub fn flatten_configuration(config: &WidgetConfiguration) -> Vec<(String, FlatValue)> {
    let mut columns = Vec::new();
    let [design_schema, display_schema] = flattened_schema();
    collect_leaves(design_schema, &group_value(&config.design), &mut columns);
    collect_leaves(display_schema, &group_value(&config.display), &mut columns);
    columns
}

/// Flattened column names with their SQL types, derived from the defaults.
pub fn flattened_column_types() -> Vec<(String, &'static str)> {
    flatten_configuration(&WidgetConfiguration::default())
        .into_iter()
        .map(|(name, value)| (name, value.sql_type()))
        .collect()
}
