//! Built-in design presets.
//!
//! Each preset is deliberately sparse and always applied on top of the full
//! defaults. Overrides are written as JSON so they read the same way stored
//! rows do and go through the same lenient partial parsing.

use crate::models::design::DesignSettings;
use crate::models::display::DisplaySettings;
use crate::models::merge::Settings;
use crate::models::template::NotificationDesignPreset;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// A preset as written, before its overrides are parsed.
struct PresetSource {
    id: &'static str,
    template_id: &'static str,
    name: &'static str,
    description: &'static str,
    design: Value,
    display: Value,
}

impl PresetSource {
    fn into_preset(self) -> NotificationDesignPreset {
        NotificationDesignPreset {
            id: self.id.to_string(),
            template_id: self.template_id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            design: DesignSettings::partial_from_value(&self.design),
            display: DisplaySettings::partial_from_value(&self.display),
        }
    }
}

fn preset(
    id: &'static str,
    template_id: &'static str,
    name: &'static str,
    description: &'static str,
    design: Value,
    display: Value,
) -> PresetSource {
    PresetSource {
        id,
        template_id,
        name,
        description,
        design,
        display,
    }
}

fn preset_sources() -> Vec<PresetSource> {
    vec![
        preset(
            "recent_purchase_classic_card",
            "recent_purchase",
            "Classic Card",
            "White card with a blue accent stripe and price",
            json!({
                "position": {"position": "bottom-left"},
                "layout": {"layoutStyle": "card"},
                "border": {"borderRadius": 12, "borderLeftAccent": true}
            }),
            json!({
                "content": {"showValue": true, "currency": "USD", "valueFormat": "currency"}
            }),
        ),
        preset(
            "recent_purchase_minimal",
            "recent_purchase",
            "Minimal",
            "Compact pill without avatar or accent",
            json!({
                "layout": {"layoutStyle": "minimal", "maxWidth": 320},
                "border": {"borderRadius": 999, "borderLeftAccent": false},
                "shadow": {"shadow": "sm"}
            }),
            json!({
                "content": {"showAvatar": false, "showValue": false},
                "duration": {"showProgressBar": false}
            }),
        ),
        preset(
            "recent_purchase_glass",
            "recent_purchase",
            "Frosted Glass",
            "Translucent card for dark or image-heavy sites",
            json!({
                "shadow": {"glassmorphism": true, "backdropBlur": 16, "shadow": "xl"},
                "background": {"backgroundColor": "#0f172a", "backgroundOpacity": 0.7, "textColor": "#f8fafc", "secondaryTextColor": "#cbd5e1"}
            }),
            json!({
                "duration": {"animationType": "fade"}
            }),
        ),
        preset(
            "new_signup_friendly",
            "new_signup",
            "Friendly Welcome",
            "Green accent with anonymized names",
            json!({
                "border": {"borderLeftAccentColor": "#10b981"},
                "position": {"position": "bottom-right"}
            }),
            json!({
                "privacy": {"anonymizeNames": true, "anonymizationStyle": "first-initial"},
                "content": {"showValue": false}
            }),
        ),
        preset(
            "product_review_stars",
            "product_review",
            "Star Spotlight",
            "Larger card showing rating and review excerpt",
            json!({
                "layout": {"maxWidth": 420},
                "border": {"borderLeftAccentColor": "#f59e0b"}
            }),
            json!({
                "content": {"showRating": true, "showReviewContent": true, "showValue": false, "showLocation": false},
                "duration": {"displayDuration": 10}
            }),
        ),
        preset(
            "live_visitors_pulse",
            "live_visitors",
            "Pulse Counter",
            "Compact live counter at the top of the page",
            json!({
                "position": {"position": "top-center", "offsetY": 12},
                "layout": {"layoutStyle": "compact"}
            }),
            json!({
                "content": {"showAvatar": false, "showTimestamp": false, "showLocation": false, "showValue": false, "valueFormat": "number"},
                "duration": {"animationType": "zoom"}
            }),
        ),
        preset(
            "cart_activity_urgent",
            "cart_activity",
            "Urgent Orange",
            "Orange accent with a fast bounce",
            json!({
                "border": {"borderLeftAccentColor": "#f97316"}
            }),
            json!({
                "duration": {"animationType": "bounce", "animationSpeed": "fast"},
                "privacy": {"anonymizeNames": true}
            }),
        ),
        preset(
            "low_stock_alert",
            "low_stock",
            "Stock Alert Banner",
            "Full-width red banner",
            json!({
                "layout": {"layoutStyle": "banner"},
                "background": {"backgroundColor": "#fef2f2", "textColor": "#991b1b"},
                "border": {"borderLeftAccentColor": "#dc2626"}
            }),
            json!({
                "content": {"showAvatar": false, "showTimestamp": false, "showLocation": false, "showValue": false}
            }),
        ),
        preset(
            "form_submission_clean",
            "form_submission",
            "Clean Lead",
            "Neutral card with initials avatar",
            json!({
                "shadow": {"shadow": "md"}
            }),
            json!({
                "content": {"showValue": false},
                "privacy": {"anonymizationStyle": "first-last-initial"}
            }),
        ),
        preset(
            "donation_warm",
            "donation",
            "Warm Thanks",
            "Soft rose card with rounded corners",
            json!({
                "background": {"backgroundColor": "#fff1f2"},
                "border": {"borderRadius": 20, "borderLeftAccentColor": "#e11d48"}
            }),
            json!({
                "content": {"showValue": true, "currency": "USD"}
            }),
        ),
    ]
}

/// Every built-in design preset.
pub fn design_presets() -> &'static [NotificationDesignPreset] {
    static PRESETS: OnceLock<Vec<NotificationDesignPreset>> = OnceLock::new();
    PRESETS.get_or_init(|| {
        preset_sources()
            .into_iter()
            .map(PresetSource::into_preset)
            .collect()
    })
}

/// Exact-match lookup by preset id.
pub fn get_preset_by_id(id: &str) -> Option<&'static NotificationDesignPreset> {
    design_presets().iter().find(|p| p.id == id)
}

/// Presets designed for `template_id`.
pub fn get_presets_for_template(template_id: &str) -> Vec<&'static NotificationDesignPreset> {
    design_presets()
        .iter()
        .filter(|p| p.template_id == template_id)
        .collect()
}
