//! End-to-end widget lifecycle tests against a temporary SQLite store.
//!
//! Covers:
//! 1. Creating a widget from a template and preset
//! 2. Loading legacy rows that predate whole settings groups
//! 3. Save/reload with the flattened renderer columns kept in step
//! 4. Failed saves leaving the editor session untouched

use proof_widgets::catalog::NewWidget;
use proof_widgets::db::StoreConfig;
use proof_widgets::models::design::Position;
use proof_widgets::models::widget_row::{flatten_configuration, FlatValue};
use proof_widgets::render::{get_template_sample, render_notification, Viewport};
use proof_widgets::{AppError, ConfigStore, EditorSession, WidgetConfiguration};
use tempfile::{tempdir, TempDir};

async fn setup_store() -> (TempDir, ConfigStore) {
    let dir = tempdir().unwrap();
    let store = ConfigStore::open(&dir.path().join("widgets.db"), &StoreConfig::default())
        .await
        .unwrap();
    (dir, store)
}

fn flat<'a>(columns: &'a [(String, FlatValue)], name: &str) -> &'a FlatValue {
    columns
        .iter()
        .find(|(column, _)| column == name)
        .map(|(_, value)| value)
        .unwrap_or_else(|| panic!("missing column {name}"))
}

#[tokio::test]
async fn test_create_from_template_and_preset() {
    let (_dir, store) = setup_store().await;

    let created = store
        .create_from_catalog(&NewWidget {
            template_id: "recent_purchase".to_string(),
            design_preset_id: Some("recent_purchase_classic_card".to_string()),
            site_id: Some("site-1".to_string()),
            ..NewWidget::default()
        })
        .await
        .unwrap();

    let loaded = store.load(&created.id).await.unwrap();
    assert_eq!(loaded.design.position.position, Position::BottomLeft);
    assert!(loaded.display.content.show_value);
    assert_eq!(loaded.display.content.currency, "USD");
    assert_eq!(loaded.design_preset_id.as_deref(), Some("recent_purchase_classic_card"));
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn test_legacy_row_without_webhooks() {
    let (_dir, store) = setup_store().await;

    // A row written before webhooks existed, with a sparse design blob.
    sqlx::query(
        r#"
        INSERT INTO widgets (id, site_id, name, type, is_active, version, created_at, updated_at, config)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind("legacy-1")
    .bind("site-1")
    .bind("Legacy widget")
    .bind("notification")
    .bind(false)
    .bind(4i64)
    .bind(1_600_000_000i64)
    .bind(1_600_000_100i64)
    .bind(r#"{"templateId": "new_signup", "design": {"border": {"borderLeftAccent": false, "borderRadius": 5}}}"#)
    .execute(store.pool())
    .await
    .unwrap();

    let loaded = store.load("legacy-1").await.unwrap();
    assert!(loaded.webhooks.auto_capture.enabled);
    assert!(!loaded.design.border.border_left_accent);
    assert_eq!(loaded.design.border.border_radius, 5);
    assert_eq!(loaded.design.position, WidgetConfiguration::default().design.position);
    assert!(!loaded.is_active);
    assert_eq!(loaded.version, 4);
    assert_eq!(loaded.template_id.as_deref(), Some("new_signup"));
}

#[tokio::test]
async fn test_save_reload_keeps_flattened_columns_in_step() {
    let (_dir, store) = setup_store().await;
    let created = store.create(&WidgetConfiguration::default()).await.unwrap();

    let mut session = EditorSession::open(store.clone(), &created.id).await.unwrap();
    session.update(|c| {
        c.design.border.border_radius = 0;
        c.design.position.offset_x = -4;
        c.design.background.background_opacity = 0.85;
        c.display.duration.display_duration = 11;
        c.display.privacy.anonymize_names = true;
        c.display.content.timestamp_prefix = "Bought".to_string();
    });
    session.save().await.unwrap();

    let reloaded = store.load(&created.id).await.unwrap();
    assert_eq!(reloaded.version, created.version + 1);
    assert!(reloaded.updated_at >= created.updated_at);
    assert_eq!(&reloaded, session.config());

    let columns = store.flattened_columns(&created.id).await.unwrap();
    assert_eq!(columns, flatten_configuration(&reloaded));
    assert_eq!(flat(&columns, "border_radius"), &FlatValue::Integer(0));
    assert_eq!(flat(&columns, "offset_x"), &FlatValue::Integer(-4));
    assert_eq!(flat(&columns, "background_opacity"), &FlatValue::Real(0.85));
    assert_eq!(flat(&columns, "display_duration"), &FlatValue::Integer(11));
    assert_eq!(flat(&columns, "anonymize_names"), &FlatValue::Bool(true));
    assert_eq!(flat(&columns, "timestamp_prefix"), &FlatValue::Text("Bought".to_string()));
}

#[tokio::test]
async fn test_each_save_increments_version_once() {
    let (_dir, store) = setup_store().await;
    let created = store.create(&WidgetConfiguration::default()).await.unwrap();

    let first = store.save(&created).await.unwrap();
    let second = store.save(&first).await.unwrap();
    assert_eq!(first.version, 2);
    assert_eq!(second.version, 3);
    assert_eq!(store.load(&created.id).await.unwrap().version, 3);
}

#[tokio::test]
async fn test_stale_save_overwrites() {
    let (_dir, store) = setup_store().await;
    let created = store.create(&WidgetConfiguration::default()).await.unwrap();

    let mut a = EditorSession::open(store.clone(), &created.id).await.unwrap();
    let mut b = EditorSession::open(store.clone(), &created.id).await.unwrap();

    a.update(|c| c.name = "From A".to_string());
    a.save().await.unwrap();

    // B still holds version 1 and is not rejected.
    b.update(|c| c.name = "From B".to_string());
    b.save().await.unwrap();

    let stored = store.load(&created.id).await.unwrap();
    assert_eq!(stored.name, "From B");
    assert_eq!(stored.version, 2);
}

#[tokio::test]
async fn test_failed_save_leaves_session_dirty() {
    let (_dir, store) = setup_store().await;
    let created = store.create(&WidgetConfiguration::default()).await.unwrap();

    let mut session = EditorSession::open(store.clone(), &created.id).await.unwrap();
    session.update(|c| c.display.content.show_value = false);
    let before = session.config().clone();

    store.pool().close().await;

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, AppError::Database { .. }));
    assert!(session.is_dirty());
    assert_eq!(session.config(), &before);
    assert_eq!(session.snapshot(), &created);
    assert!(session.last_error().is_some());
}

#[tokio::test]
async fn test_missing_widget_is_not_found() {
    let (_dir, store) = setup_store().await;

    let err = match EditorSession::open(store.clone(), "does-not-exist").await {
        Ok(_) => panic!("expected NotFound"),
        Err(e) => e,
    };
    assert!(err.is_not_found());

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["type"], "NotFound");
    assert_eq!(json["details"]["message"], "Widget not found or you do not have access");
}

#[tokio::test]
async fn test_preview_renders_from_stored_widget() {
    let (_dir, store) = setup_store().await;
    let created = store
        .create_from_catalog(&NewWidget {
            template_id: "new_signup".to_string(),
            design_preset_id: Some("new_signup_friendly".to_string()),
            ..NewWidget::default()
        })
        .await
        .unwrap();

    let loaded = store.load(&created.id).await.unwrap();
    let template_id = loaded.template_id.clone().unwrap_or_default();
    let now = chrono::Utc::now();
    let rendered = render_notification(&loaded, get_template_sample(&template_id), now, Viewport::Desktop);

    assert_eq!(rendered.display_name, "Michael C.");
    assert_eq!(rendered.value, None);
    assert_eq!(rendered.position.right.as_deref(), Some("20px"));
    assert_eq!(rendered.meta_line, "5 minutes ago • London, GB");
}

#[tokio::test]
async fn test_unknown_keys_survive_load_and_save() {
    let (_dir, store) = setup_store().await;

    sqlx::query(
        r#"
        INSERT INTO widgets (id, site_id, name, type, is_active, version, created_at, updated_at, config)
        VALUES (?, NULL, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind("future-1")
    .bind("Newer schema widget")
    .bind("notification")
    .bind(true)
    .bind(1i64)
    .bind(1_700_000_000i64)
    .bind(1_700_000_000i64)
    .bind(
        r#"{"legacyRoot": 1, "design": {"legacyTheme": "dark", "border": {"borderRadius": 5, "legacyGlow": true}}}"#,
    )
    .execute(store.pool())
    .await
    .unwrap();

    let loaded = store.load("future-1").await.unwrap();
    assert_eq!(loaded.design.border.border_radius, 5);
    store.save(&loaded).await.unwrap();

    let (config,): (String,) = sqlx::query_as("SELECT config FROM widgets WHERE id = ?")
        .bind("future-1")
        .fetch_one(store.pool())
        .await
        .unwrap();
    let blob: serde_json::Value = serde_json::from_str(&config).unwrap();
    assert_eq!(blob["legacyRoot"], 1);
    assert_eq!(blob["design"]["legacyTheme"], "dark");
    assert_eq!(blob["design"]["border"]["legacyGlow"], true);
    assert_eq!(blob["design"]["border"]["borderRadius"], 5);

    // Unknown keys never become renderer columns.
    let columns = store.flattened_columns("future-1").await.unwrap();
    assert!(columns.iter().all(|(name, _)| name != "legacy_theme" && name != "legacy_glow"));
}

#[tokio::test]
async fn test_site_change_is_persisted() {
    let (_dir, store) = setup_store().await;
    let created = store
        .create(&WidgetConfiguration {
            site_id: Some("site-1".to_string()),
            ..WidgetConfiguration::default()
        })
        .await
        .unwrap();

    let mut session = EditorSession::open(store.clone(), &created.id).await.unwrap();
    session.update(|c| c.site_id = Some("site-2".to_string()));
    session.save().await.unwrap();

    let stored = store.load(&created.id).await.unwrap();
    assert_eq!(stored.site_id.as_deref(), Some("site-2"));
    assert_eq!(&stored, session.snapshot());
    assert!(store.list_for_site("site-1").await.unwrap().is_empty());
    assert_eq!(store.list_for_site("site-2").await.unwrap().len(), 1);
}
