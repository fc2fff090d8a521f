//! Notification template and design preset models.
//!
//! Both are code-defined catalog entries; see [`crate::catalog`].

use crate::models::design::PartialDesignSettings;
use crate::models::display::PartialDisplaySettings;
use serde::{Deserialize, Serialize};

/// Filter rules a template starts a widget with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRules {
    pub event_types: Vec<String>,

    /// Events below this value are ignored (`None` = no minimum).
    #[serde(default)]
    pub min_value: Option<f64>,

    /// Only events from the last N hours are eligible.
    pub time_window_hours: u32,

    pub exclude_test_events: bool,

    pub require_location: bool,
}

/// Display flags a template starts a widget with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDisplayDefaults {
    /// Seconds on screen.
    pub duration: u32,
    pub show_timestamp: bool,
    pub show_location: bool,
    pub anonymize: bool,
}

/// Title/message patterns with `{variable}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub title: String,
    pub message: String,
}

/// Canned strings shown in the catalog and in empty editor previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewData {
    pub title: String,
    pub message: String,
    pub timestamp: String,
}

/// A semantic kind of notification (purchase, signup, review, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Icon tag understood by the dashboard.
    pub icon: String,
    pub category: String,
    pub default_rules: TemplateRules,
    pub default_display: TemplateDisplayDefaults,
    pub message_template: MessageTemplate,
    pub preview_data: PreviewData,
}

/// Result of substituting event data into a [`MessageTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedMessage {
    pub title: String,
    pub message: String,
}

/// A named visual style applied on top of the schema defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDesignPreset {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub description: String,
    /// Sparse design overrides.
    pub design: PartialDesignSettings,
    /// Sparse display overrides.
    pub display: PartialDisplaySettings,
}
