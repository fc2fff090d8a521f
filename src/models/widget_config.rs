//! Root widget configuration and merge-with-defaults.
//!
//! A stored configuration may be arbitrarily sparse: legacy rows, hand-edited
//! rows and rows written before a field existed all complete to a fully
//! populated [`WidgetConfiguration`] through [`merge_with_defaults`].

use crate::models::branding::{BrandingSettings, PartialBrandingSettings};
use crate::models::design::{DesignSettings, PartialDesignSettings};
use crate::models::display::{DisplaySettings, PartialDisplaySettings};
use crate::models::integrations::{
    AnalyticsSettings, EcommerceSettings, IntegrationSettings, PartialAnalyticsSettings,
    PartialEcommerceSettings, PartialIntegrationSettings, PartialWebhookSettings, WebhookSettings,
};
use crate::models::merge::{lenient, lenient_group, merged_extra, Settings};
use crate::models::template::{PreviewData, TemplateRules};
use crate::models::triggers::{PartialTriggerSettings, TriggerSettings};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Widget type tag written for new widgets.
pub const DEFAULT_WIDGET_TYPE: &str = "notification";

/// Name given to widgets created without one.
pub const DEFAULT_WIDGET_NAME: &str = "New Notification";

/// Keys stored as dedicated row columns rather than inside the `config` blob.
pub const ROW_COLUMN_KEYS: &[&str] = &[
    "id",
    "siteId",
    "name",
    "widgetType",
    "isActive",
    "version",
    "createdAt",
    "updatedAt",
];

/// The full, schema-complete settings of one notification widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfiguration {
    pub id: String,

    /// Owning site, if any.
    pub site_id: Option<String>,

    pub name: String,

    /// Type tag (e.g. `notification`).
    pub widget_type: String,

    pub is_active: bool,

    /// Incremented on every save. Not checked on write (last write wins).
    pub version: i64,

    /// Unix timestamp of creation.
    pub created_at: i64,

    /// Unix timestamp of the last save.
    pub updated_at: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_preset_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_data: Option<PreviewData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<TemplateRules>,

    pub design: DesignSettings,
    pub triggers: TriggerSettings,
    pub display: DisplaySettings,
    pub branding: BrandingSettings,
    pub webhooks: WebhookSettings,
    pub ecommerce: EcommerceSettings,
    pub integrations: IntegrationSettings,
    pub analytics: AnalyticsSettings,

    /// Unrecognized keys from the stored blob, carried through saves untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for WidgetConfiguration {
    fn default() -> Self {
        Self {
            id: String::new(),
            site_id: None,
            name: DEFAULT_WIDGET_NAME.to_string(),
            widget_type: DEFAULT_WIDGET_TYPE.to_string(),
            is_active: true,
            version: 1,
            created_at: 0,
            updated_at: 0,
            template_id: None,
            template_name: None,
            design_preset_id: None,
            preview_data: None,
            rules: None,
            design: DesignSettings::default(),
            triggers: TriggerSettings::default(),
            display: DisplaySettings::default(),
            branding: BrandingSettings::default(),
            webhooks: WebhookSettings::default(),
            ecommerce: EcommerceSettings::default(),
            integrations: IntegrationSettings::default(),
            analytics: AnalyticsSettings::default(),
            extra: Map::new(),
        }
    }
}

/// Sparse form of [`WidgetConfiguration`], as reconstructed from a stored row.
///
/// Every leaf is parsed leniently; `null` on a non-nullable field counts as
/// absent. Unknown keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialWidgetConfig {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub design_preset_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub preview_data: Option<PreviewData>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rules: Option<TemplateRules>,
    #[serde(default, deserialize_with = "lenient_group", skip_serializing_if = "Option::is_none")]
    pub design: Option<PartialDesignSettings>,
    #[serde(default, deserialize_with = "lenient_group", skip_serializing_if = "Option::is_none")]
    pub triggers: Option<PartialTriggerSettings>,
    #[serde(default, deserialize_with = "lenient_group", skip_serializing_if = "Option::is_none")]
    pub display: Option<PartialDisplaySettings>,
    #[serde(default, deserialize_with = "lenient_group", skip_serializing_if = "Option::is_none")]
    pub branding: Option<PartialBrandingSettings>,
    #[serde(default, deserialize_with = "lenient_group", skip_serializing_if = "Option::is_none")]
    pub webhooks: Option<PartialWebhookSettings>,
    #[serde(default, deserialize_with = "lenient_group", skip_serializing_if = "Option::is_none")]
    pub ecommerce: Option<PartialEcommerceSettings>,
    #[serde(default, deserialize_with = "lenient_group", skip_serializing_if = "Option::is_none")]
    pub integrations: Option<PartialIntegrationSettings>,
    #[serde(default, deserialize_with = "lenient_group", skip_serializing_if = "Option::is_none")]
    pub analytics: Option<PartialAnalyticsSettings>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PartialWidgetConfig {
    /// Parse a stored JSON value. Non-objects yield an empty partial.
    pub fn from_value(value: &Value) -> Self {
        WidgetConfiguration::partial_from_value(value)
    }
}

/// Overlay a nested partial group, keeping the base when absent.
fn merge_group<S: Settings>(base: &S, partial: &Option<S::Partial>) -> S {
    match partial {
        Some(p) => base.merged(p),
        None => base.clone(),
    }
}

impl Settings for WidgetConfiguration {
    type Partial = PartialWidgetConfig;

    fn merged(&self, p: &PartialWidgetConfig) -> Self {
        Self {
            id: p.id.clone().unwrap_or_else(|| self.id.clone()),
            site_id: p.site_id.clone().or_else(|| self.site_id.clone()),
            name: p.name.clone().unwrap_or_else(|| self.name.clone()),
            widget_type: p.widget_type.clone().unwrap_or_else(|| self.widget_type.clone()),
            is_active: p.is_active.unwrap_or(self.is_active),
            version: p.version.unwrap_or(self.version),
            created_at: p.created_at.unwrap_or(self.created_at),
            updated_at: p.updated_at.unwrap_or(self.updated_at),
            template_id: p.template_id.clone().or_else(|| self.template_id.clone()),
            template_name: p.template_name.clone().or_else(|| self.template_name.clone()),
            design_preset_id: p
                .design_preset_id
                .clone()
                .or_else(|| self.design_preset_id.clone()),
            preview_data: p.preview_data.clone().or_else(|| self.preview_data.clone()),
            rules: p.rules.clone().or_else(|| self.rules.clone()),
            design: merge_group(&self.design, &p.design),
            triggers: merge_group(&self.triggers, &p.triggers),
            display: merge_group(&self.display, &p.display),
            branding: merge_group(&self.branding, &p.branding),
            webhooks: merge_group(&self.webhooks, &p.webhooks),
            ecommerce: merge_group(&self.ecommerce, &p.ecommerce),
            integrations: merge_group(&self.integrations, &p.integrations),
            analytics: merge_group(&self.analytics, &p.analytics),
            extra: merged_extra(&self.extra, &p.extra),
        }
    }
}

impl WidgetConfiguration {
    /// The nested JSON blob stored in the `config` column: everything except
    /// the fields that have their own row columns.
    pub fn config_blob(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            for key in ROW_COLUMN_KEYS {
                map.remove(*key);
            }
        }
        Ok(value)
    }
}

/// Complete a partial configuration against the canonical defaults.
pub fn merge_with_defaults(partial: &PartialWidgetConfig) -> WidgetConfiguration {
    WidgetConfiguration::from_partial(partial)
}

/// Complete a raw stored JSON value against the canonical defaults.
pub fn merge_with_defaults_value(value: &Value) -> WidgetConfiguration {
    WidgetConfiguration::default().merged_with_value(value)
}

/// Complete partial design settings (e.g. from a preset) against the defaults.
pub fn merge_design_with_defaults(partial: &PartialDesignSettings) -> DesignSettings {
    DesignSettings::from_partial(partial)
}

/// Complete partial display settings (e.g. from a preset) against the defaults.
pub fn merge_display_with_defaults(partial: &PartialDisplaySettings) -> DisplaySettings {
    DisplaySettings::from_partial(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::design::Position;
    use serde_json::json;

    #[test]
    fn test_empty_partial_is_default() {
        assert_eq!(merge_with_defaults(&PartialWidgetConfig::default()), WidgetConfiguration::default());
        assert_eq!(merge_with_defaults_value(&json!({})), WidgetConfiguration::default());
    }

    #[test]
    fn test_false_accent_is_preserved() {
        let config = merge_with_defaults_value(&json!({
            "design": {"border": {"borderLeftAccent": false}}
        }));
        assert!(!config.design.border.border_left_accent);
    }

    #[test]
    fn test_partial_border_keeps_position() {
        let config = merge_with_defaults_value(&json!({
            "design": {"border": {"borderRadius": 5}}
        }));
        assert_eq!(config.design.border.border_radius, 5);
        assert_eq!(config.design.position, WidgetConfiguration::default().design.position);
        assert_eq!(config.design.position.position, Position::BottomLeft);
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let config = merge_with_defaults_value(&json!({"legacyTheme": "dark", "name": "Sales"}));
        assert_eq!(config.extra.get("legacyTheme"), Some(&json!("dark")));
        assert_eq!(config.name, "Sales");

        let blob = config.config_blob().unwrap();
        assert_eq!(blob["legacyTheme"], "dark");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge_with_defaults_value(&json!({
            "isActive": false,
            "templateId": "recent_purchase",
            "display": {"content": {"showValue": false, "currency": "EUR"}},
            "triggers": {"urlRules": {"includeUrls": ["/checkout"]}},
            "custom": [1, 2, 3]
        }));
        let twice = merge_with_defaults_value(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_config_blob_excludes_row_columns() {
        let config = WidgetConfiguration {
            id: "w1".to_string(),
            version: 4,
            ..WidgetConfiguration::default()
        };
        let blob = config.config_blob().unwrap();
        for key in ROW_COLUMN_KEYS {
            assert!(blob.get(*key).is_none(), "{key} should not be in the blob");
        }
        assert!(blob.get("design").is_some());
        assert!(blob.get("webhooks").is_some());
    }

    #[test]
    fn test_wrong_typed_group_falls_back() {
        let config = merge_with_defaults_value(&json!({"design": "fancy", "version": "seven"}));
        assert_eq!(config.design, DesignSettings::default());
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_sub_tree_merges() {
        let partial: PartialDisplaySettings =
            serde_json::from_value(json!({"privacy": {"anonymizeNames": true}})).unwrap();
        let display = merge_display_with_defaults(&partial);
        assert!(display.privacy.anonymize_names);
        assert_eq!(display.duration.display_duration, 8);

        let design = merge_design_with_defaults(&PartialDesignSettings::default());
        assert_eq!(design, DesignSettings::default());
    }
}
