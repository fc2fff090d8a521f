//! Data models for widget configurations.
//!
//! The settings groups are declared through the `settings_group!` macro in
//! [`merge`], which gives every group a canonical default and a lenient
//! partial twin. [`widget_config`] ties the groups together, and
//! [`widget_row`] maps the configuration onto its stored row.

pub mod branding;
pub mod design;
pub mod display;
pub mod integrations;
pub mod merge;
pub mod template;
pub mod triggers;
pub mod widget_config;
pub mod widget_row;

// Re-exports for convenient access
pub use branding::BrandingSettings;
pub use design::{DesignSettings, LayoutStyle, PartialDesignSettings, Position, ShadowSize};
pub use display::{
    AnimationSpeed, AnimationType, AnonymizationStyle, ContentSettings, CurrencyPosition,
    DisplaySettings, LocationFormat, PartialDisplaySettings, PrivacySettings, TimestampFormat,
    ValueFormat,
};
pub use integrations::{AnalyticsSettings, EcommerceSettings, IntegrationSettings, WebhookSettings};
pub use merge::Settings;
pub use template::{
    FormattedMessage, MessageTemplate, NotificationDesignPreset, NotificationTemplate, PreviewData,
    TemplateDisplayDefaults, TemplateRules,
};
pub use triggers::{DisplayFrequency, TriggerSettings};
pub use widget_config::{
    merge_design_with_defaults, merge_display_with_defaults, merge_with_defaults,
    merge_with_defaults_value, PartialWidgetConfig, WidgetConfiguration,
};
pub use widget_row::{flatten_configuration, FlatValue, WidgetRow};
