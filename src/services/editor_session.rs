//! In-memory editing of one widget configuration.
//!
//! The session owns the working copy and the last loaded/saved snapshot.
//! Edits apply locally and immediately; nothing reaches the store until
//! [`EditorSession::save`]. Dropping a session discards pending edits.

use crate::error::AppError;
use crate::models::widget_config::WidgetConfiguration;
use crate::services::config_store::ConfigStore;

pub struct EditorSession {
    store: ConfigStore,
    snapshot: WidgetConfiguration,
    current: WidgetConfiguration,
    last_error: Option<AppError>,
}

impl EditorSession {
    /// Start a session on an already loaded configuration.
    pub fn new(store: ConfigStore, config: WidgetConfiguration) -> Self {
        Self {
            store,
            snapshot: config.clone(),
            current: config,
            last_error: None,
        }
    }

    /// Load widget `id` and start a session on it.
    pub async fn open(store: ConfigStore, id: &str) -> Result<Self, AppError> {
        let config = store.load(id).await?;
        Ok(Self::new(store, config))
    }

    /// The working copy, including unsaved edits.
    pub fn config(&self) -> &WidgetConfiguration {
        &self.current
    }

    /// The last loaded or saved value.
    pub fn snapshot(&self) -> &WidgetConfiguration {
        &self.snapshot
    }

    /// Apply a local edit.
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut WidgetConfiguration),
    {
        edit(&mut self.current);
    }

    /// Whether the working copy differs from the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.current != self.snapshot
    }

    /// Revert the working copy to the snapshot.
    pub fn discard(&mut self) {
        if self.is_dirty() {
            log::debug!("[editor] Discarding edits to widget {}", self.current.id);
        }
        self.current = self.snapshot.clone();
    }

    /// Persist the working copy.
    ///
    /// On success the saved value (new version, fresh `updatedAt`) becomes
    /// both the snapshot and the working copy. On failure nothing changes
    /// locally, the session stays dirty and the error is kept for display.
    pub async fn save(&mut self) -> Result<&WidgetConfiguration, AppError> {
        match self.store.save(&self.current).await {
            Ok(saved) => {
                self.snapshot = saved.clone();
                self.current = saved;
                self.last_error = None;
                Ok(&self.current)
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Replace both copies with the stored value, dropping local edits.
    pub async fn reload(&mut self) -> Result<(), AppError> {
        let config = self.store.load(&self.current.id).await?;
        self.snapshot = config.clone();
        self.current = config;
        self.last_error = None;
        Ok(())
    }

    /// The error from the most recent failed save, if any.
    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_dirty_tracking_and_discard() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::open(&dir.path().join("test.db"), &StoreConfig::default())
            .await
            .unwrap();
        let created = store.create(&WidgetConfiguration::default()).await.unwrap();

        let mut session = EditorSession::open(store, &created.id).await.unwrap();
        assert!(!session.is_dirty());

        session.update(|c| c.design.border.border_left_accent = false);
        assert!(session.is_dirty());

        // Editing back to the snapshot value is clean again (structural).
        session.update(|c| c.design.border.border_left_accent = true);
        assert!(!session.is_dirty());

        session.update(|c| c.name = "Renamed".to_string());
        session.discard();
        assert!(!session.is_dirty());
        assert_eq!(session.config().name, created.name);
    }

    #[tokio::test]
    async fn test_save_updates_snapshot() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::open(&dir.path().join("test.db"), &StoreConfig::default())
            .await
            .unwrap();
        let created = store.create(&WidgetConfiguration::default()).await.unwrap();

        let mut session = EditorSession::new(store, created.clone());
        session.update(|c| c.display.privacy.anonymize_names = true);

        let version = session.save().await.unwrap().version;
        assert_eq!(version, created.version + 1);
        assert!(!session.is_dirty());
        assert!(session.last_error().is_none());

        session.update(|c| c.name = "Local only".to_string());
        session.reload().await.unwrap();
        assert!(!session.is_dirty());
        assert!(session.config().display.privacy.anonymize_names);
    }
}
