//! Static template and design preset catalogs, and widget creation from them.

pub mod presets;
pub mod templates;

pub use presets::{design_presets, get_preset_by_id, get_presets_for_template};
pub use templates::{
    all_templates, format_notification_message, get_template_by_id, get_templates_by_category,
    resolve_template_id,
};

use crate::error::AppError;
use crate::models::display::DisplaySettings;
use crate::models::merge::Settings;
use crate::models::template::NotificationTemplate;
use crate::models::widget_config::WidgetConfiguration;
use serde_json::json;

/// Input for creating a widget from the catalogs.
#[derive(Debug, Clone, Default)]
pub struct NewWidget {
    pub template_id: String,
    pub design_preset_id: Option<String>,
    /// Defaults to the template name.
    pub name: Option<String>,
    pub site_id: Option<String>,
}

/// Display overrides implied by a template's default display flags.
fn template_display_overrides(template: &NotificationTemplate) -> serde_json::Value {
    let defaults = &template.default_display;
    json!({
        "duration": {"displayDuration": defaults.duration},
        "content": {
            "showTimestamp": defaults.show_timestamp,
            "showLocation": defaults.show_location
        },
        "privacy": {"anonymizeNames": defaults.anonymize}
    })
}

/// Build the initial configuration for a new widget.
///
/// Layering, lowest first: schema defaults, the template's display flags,
/// the preset's overrides. The template's rules and preview data are copied
/// in as the initial trigger filter and preview.
pub fn build_widget_configuration(input: &NewWidget, now: i64) -> Result<WidgetConfiguration, AppError> {
    let template = get_template_by_id(&input.template_id).ok_or_else(|| {
        AppError::invalid_input_field(
            format!("Unknown template '{}'", input.template_id),
            "templateId",
        )
    })?;

    let preset = match &input.design_preset_id {
        Some(id) => {
            let preset = get_preset_by_id(id).ok_or_else(|| {
                AppError::invalid_input_field(format!("Unknown design preset '{}'", id), "designPresetId")
            })?;
            if preset.template_id != template.id {
                log::warn!(
                    "[catalog] Preset {} is designed for {}, applying it to {}",
                    preset.id,
                    preset.template_id,
                    template.id
                );
            }
            Some(preset)
        }
        None => None,
    };

    let mut config = WidgetConfiguration {
        id: uuid::Uuid::new_v4().to_string(),
        site_id: input.site_id.clone(),
        name: input.name.clone().unwrap_or_else(|| template.name.clone()),
        created_at: now,
        updated_at: now,
        template_id: Some(template.id.clone()),
        template_name: Some(template.name.clone()),
        design_preset_id: preset.map(|p| p.id.clone()),
        preview_data: Some(template.preview_data.clone()),
        rules: Some(template.default_rules.clone()),
        ..WidgetConfiguration::default()
    };

    config.display = config
        .display
        .merged_with_value(&template_display_overrides(template));
    config.triggers.event_types = template.default_rules.event_types.clone();

    if let Some(preset) = preset {
        config.design = preset.design.apply_to(&config.design);
        config.display = preset.display.apply_to(&config.display);
    }

    Ok(config)
}

/// Complete display settings for a template alone, as shown in the catalog.
pub fn template_display_settings(template: &NotificationTemplate) -> DisplaySettings {
    DisplaySettings::default().merged_with_value(&template_display_overrides(template))
}
