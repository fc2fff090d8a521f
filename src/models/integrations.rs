//! Webhook capture, e-commerce, third-party integration and analytics settings.

use crate::models::merge::settings_group;
use serde::{Deserialize, Serialize};

/// How events reach the widget backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationMode {
    /// Inbound webhooks plus CSV uploads.
    #[default]
    Webhook,
    /// A platform plugin pushes events directly.
    Plugin,
}

/// Storefront platform the site runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EcommercePlatform {
    #[default]
    Custom,
    Shopify,
    Woocommerce,
    Stripe,
}

settings_group! {
    /// Automatic form-submission capture on the host page.
    pub struct AutoCaptureSettings / PartialAutoCaptureSettings {
        leaves {
            enabled: bool = true,
            /// CSS selectors of forms to capture.
            form_selectors: Vec<String> = vec!["form".to_string()],
            /// Field names never captured.
            exclude_fields: Vec<String> = vec![
                "password".to_string(),
                "card_number".to_string(),
                "cvv".to_string(),
            ],
            /// Milliseconds to wait after submit before capturing.
            capture_delay: u32 = 0,
        }
        groups {}
    }
}

settings_group! {
    /// Event ingestion settings.
    pub struct WebhookSettings / PartialWebhookSettings {
        leaves {
            integration_mode: IntegrationMode = IntegrationMode::Webhook,
        }
        groups {
            auto_capture: AutoCaptureSettings / PartialAutoCaptureSettings,
        }
    }
}

settings_group! {
    /// Storefront tracking.
    pub struct EcommerceSettings / PartialEcommerceSettings {
        leaves {
            platform: EcommercePlatform = EcommercePlatform::Custom,
            track_purchases: bool = true,
            track_add_to_cart: bool = false,
            /// Orders below this value are not shown.
            min_order_value: f64 = 0.0,
        }
        groups {}
    }
}

settings_group! {
    /// Enabled third-party integrations.
    pub struct IntegrationSettings / PartialIntegrationSettings {
        leaves {
            enabled_integrations: Vec<String> = Vec::new(),
            api_key_visible: bool = false,
        }
        groups {}
    }
}

settings_group! {
    /// Widget analytics collection.
    pub struct AnalyticsSettings / PartialAnalyticsSettings {
        leaves {
            track_impressions: bool = true,
            track_clicks: bool = true,
            track_conversions: bool = true,
            utm_tracking: bool = false,
        }
        groups {}
    }
}
