//! Configuration store adapter.
//!
//! Translates between the nested [`WidgetConfiguration`] and its stored row:
//! the `config` JSON blob plus the flattened `design`/`display` columns read
//! by the on-site renderer. Every load goes through merge-with-defaults, so
//! callers never see a partially populated configuration.

use crate::catalog::{build_widget_configuration, resolve_template_id, NewWidget};
use crate::db::widgets::{self, WidgetSummary, WidgetWrite};
use crate::db::{self, DbPool, StoreConfig};
use crate::error::AppError;
use crate::models::widget_config::{merge_with_defaults, WidgetConfiguration};
use crate::models::widget_row::{flatten_configuration, FlatValue};
use serde_json::Value;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Get the current Unix timestamp.
pub(crate) fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Load/save access to stored widget configurations.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    pool: DbPool,
}

impl ConfigStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (and migrate) the database at `db_path`.
    pub async fn open(db_path: &Path, config: &StoreConfig) -> Result<Self, AppError> {
        let pool = db::initialize(db_path, config).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Load one widget, completed against the defaults.
    ///
    /// Row columns win over the blob. A widget stored without a template id
    /// gets one resolved from legacy blob locations or the row type.
    pub async fn load(&self, id: &str) -> Result<WidgetConfiguration, AppError> {
        let row = widgets::fetch_widget(&self.pool, id)
            .await
            .map_err(|e| AppError::database_with_op(e.to_string(), "load"))?
            .ok_or_else(|| AppError::widget_not_found(id))?;

        let mut partial = row.to_partial();
        if partial.template_id.is_none() {
            let blob = row.config_value().unwrap_or(Value::Null);
            partial.template_id = resolve_template_id(&blob, Some(&row.widget_type));
            if let Some(template_id) = &partial.template_id {
                log::debug!("[store] Widget {} resolved to template {}", id, template_id);
            }
        }

        log::debug!("[store] Loaded widget {} (version {})", id, row.version);
        Ok(merge_with_defaults(&partial))
    }

    /// Persist `config` and return the saved value.
    ///
    /// The returned configuration has `version + 1` and a fresh `updatedAt`;
    /// `config` itself is left untouched, so a failed save loses nothing.
    /// The stored version is not compared first (last write wins).
    pub async fn save(&self, config: &WidgetConfiguration) -> Result<WidgetConfiguration, AppError> {
        let saved = WidgetConfiguration {
            version: config.version + 1,
            updated_at: now(),
            ..config.clone()
        };

        let write = Self::prepare_write(&saved)?;
        let updated = widgets::update_widget(&self.pool, &write)
            .await
            .map_err(|e| {
                log::warn!("[store] Failed to save widget {}: {}", config.id, e);
                AppError::database_with_op(e.to_string(), "save")
            })?;

        if !updated {
            log::warn!("[store] Save for unknown widget {}", config.id);
            return Err(AppError::widget_not_found(&config.id));
        }

        log::info!("[store] Saved widget {} (version {})", saved.id, saved.version);
        Ok(saved)
    }

    /// Insert a new widget row.
    ///
    /// An empty id is replaced with a fresh UUID; timestamps default to now.
    pub async fn create(&self, config: &WidgetConfiguration) -> Result<WidgetConfiguration, AppError> {
        let timestamp = now();
        let mut created = config.clone();
        if created.id.trim().is_empty() {
            created.id = uuid::Uuid::new_v4().to_string();
        }
        if created.created_at == 0 {
            created.created_at = timestamp;
        }
        if created.updated_at == 0 {
            created.updated_at = created.created_at;
        }

        let write = Self::prepare_write(&created)?;
        widgets::insert_widget(&self.pool, &write)
            .await
            .map_err(|e| {
                log::warn!("[store] Failed to create widget {}: {}", created.id, e);
                AppError::database_with_op(e.to_string(), "create")
            })?;

        log::info!("[store] Created widget {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Create a widget from a catalog template and optional design preset.
    pub async fn create_from_catalog(&self, input: &NewWidget) -> Result<WidgetConfiguration, AppError> {
        let config = build_widget_configuration(input, now())?;
        self.create(&config).await
    }

    /// Delete a widget.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let deleted = widgets::delete_widget(&self.pool, id)
            .await
            .map_err(|e| AppError::database_with_op(e.to_string(), "delete"))?;

        if !deleted {
            return Err(AppError::widget_not_found(id));
        }

        log::info!("[store] Deleted widget {}", id);
        Ok(())
    }

    /// Summaries of a site's widgets, most recently updated first.
    pub async fn list_for_site(&self, site_id: &str) -> Result<Vec<WidgetSummary>, AppError> {
        Ok(widgets::list_widgets_for_site(&self.pool, site_id).await?)
    }

    /// Flattened columns of a stored widget, as the renderer reads them.
    pub async fn flattened_columns(&self, id: &str) -> Result<Vec<(String, FlatValue)>, AppError> {
        let kinds = flatten_configuration(&WidgetConfiguration::default());
        widgets::fetch_flattened_columns(&self.pool, id, &kinds)
            .await?
            .ok_or_else(|| AppError::widget_not_found(id))
    }

    fn prepare_write(config: &WidgetConfiguration) -> Result<WidgetWrite<'_>, AppError> {
        Ok(WidgetWrite {
            config,
            blob: serde_json::to_string(&config.config_blob()?)?,
            flattened: flatten_configuration(config),
        })
    }
}
