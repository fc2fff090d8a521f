//! Branding settings.
//!
//! `message_templates` and `custom_css` are part of the stored schema but are
//! not editable from the dashboard yet; they are carried so stored values
//! survive a load/save cycle.

use crate::models::merge::settings_group;

settings_group! {
    /// Logo, brand name and "powered by" footer.
    pub struct BrandIdentity / PartialBrandIdentity {
        leaves {
            logo_url: Option<String> = None,
            brand_name: String = String::new(),
            show_powered_by: bool = true,
            powered_by_text: String = "Powered by ProofWidgets".to_string(),
        }
        groups {}
    }
}

settings_group! {
    /// Brand color scheme.
    pub struct BrandColors / PartialBrandColors {
        leaves {
            use_brand_colors: bool = false,
            primary_color: String = "#3b82f6".to_string(),
            secondary_color: String = "#1e40af".to_string(),
        }
        groups {}
    }
}

settings_group! {
    /// Per-event message patterns using `{variable}` placeholders.
    pub struct MessageTemplates / PartialMessageTemplates {
        leaves {
            purchase: String = "{name} purchased {product} {value_display}".to_string(),
            signup: String = "{name} just signed up {location_display}".to_string(),
            review: String = "{name} left a {rating}-star review".to_string(),
        }
        groups {}
    }
}

settings_group! {
    /// Raw CSS injected after the generated styles.
    pub struct CustomCss / PartialCustomCss {
        leaves {
            enabled: bool = false,
            css: String = String::new(),
        }
        groups {}
    }
}

settings_group! {
    /// All branding settings of a widget.
    pub struct BrandingSettings / PartialBrandingSettings {
        leaves {}
        groups {
            identity: BrandIdentity / PartialBrandIdentity,
            colors: BrandColors / PartialBrandColors,
            message_templates: MessageTemplates / PartialMessageTemplates,
            custom_css: CustomCss / PartialCustomCss,
        }
    }
}
