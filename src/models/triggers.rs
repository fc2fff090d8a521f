//! Trigger settings: event filters, URL targeting and display frequency.

use crate::models::merge::settings_group;
use serde::{Deserialize, Serialize};

/// How URL rules are compared against the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrlMatchType {
    #[default]
    Contains,
    Exact,
    StartsWith,
    Regex,
}

/// How often a visitor may see notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayFrequency {
    #[default]
    AllTime,
    OncePerSession,
    OncePerDay,
}

settings_group! {
    /// Page targeting rules.
    pub struct UrlRuleSettings / PartialUrlRuleSettings {
        leaves {
            include_urls: Vec<String> = Vec::new(),
            exclude_urls: Vec<String> = Vec::new(),
            match_type: UrlMatchType = UrlMatchType::Contains,
        }
        groups {}
    }
}

settings_group! {
    /// When and how often notifications appear.
    pub struct TriggerSettings / PartialTriggerSettings {
        leaves {
            event_types: Vec<String> = vec![
                "purchase".to_string(),
                "signup".to_string(),
                "review".to_string(),
            ],
            /// Seconds after page load before the first notification.
            display_delay: u32 = 3,
            display_frequency: DisplayFrequency = DisplayFrequency::AllTime,
            /// Upper bound used when `display_frequency` is `all-time`.
            max_displays_per_session: u32 = 10,
        }
        groups {
            url_rules: UrlRuleSettings / PartialUrlRuleSettings,
        }
    }
}

impl TriggerSettings {
    /// Number of notifications a single session may show.
    pub fn effective_max_displays_per_session(&self) -> u32 {
        match self.display_frequency {
            DisplayFrequency::OncePerSession | DisplayFrequency::OncePerDay => 1,
            DisplayFrequency::AllTime => self.max_displays_per_session,
        }
    }
}
