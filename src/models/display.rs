//! Display settings: timing, content, privacy, interaction and responsiveness.

use crate::models::merge::settings_group;
use serde::{Deserialize, Serialize};

/// Entrance/exit animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationType {
    #[default]
    Slide,
    Fade,
    Bounce,
    Zoom,
    None,
}

/// Animation tempo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Animation duration in milliseconds.
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Slow => 800,
            Self::Normal => 500,
            Self::Fast => 300,
        }
    }
}

/// Edge of the card the progress bar runs along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressBarPosition {
    Top,
    #[default]
    Bottom,
}

/// How the event time is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampFormat {
    #[default]
    Relative,
    Absolute,
    Both,
}

/// How the event location is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationFormat {
    City,
    #[default]
    CityCountry,
    Country,
    FlagEmoji,
}

/// How an event value is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueFormat {
    #[default]
    Currency,
    Number,
    Text,
}

/// Currency symbol placement relative to the amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurrencyPosition {
    #[default]
    Before,
    After,
}

/// Name anonymization scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnonymizationStyle {
    /// `John Doe` -> `John D.`
    #[default]
    FirstInitial,
    /// `John Doe` -> `J. D.`
    FirstLastInitial,
    /// `John Doe` -> a fixed generic alias.
    Random,
}

/// What happens when the notification is clicked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClickAction {
    #[default]
    None,
    Url,
    Product,
}

/// Mobile anchoring edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MobilePosition {
    Top,
    #[default]
    Bottom,
}

settings_group! {
    /// Timing, animation and progress bar.
    pub struct DurationSettings / PartialDurationSettings {
        leaves {
            /// Seconds each notification stays visible.
            display_duration: u32 = 8,
            /// Seconds between consecutive notifications.
            delay_between: u32 = 5,
            animation_type: AnimationType = AnimationType::Slide,
            animation_speed: AnimationSpeed = AnimationSpeed::Normal,
            show_progress_bar: bool = true,
            progress_bar_color: String = "#3b82f6".to_string(),
            progress_bar_position: ProgressBarPosition = ProgressBarPosition::Bottom,
        }
        groups {}
    }
}

settings_group! {
    /// Which fields are shown and how they are formatted.
    pub struct ContentSettings / PartialContentSettings {
        leaves {
            show_avatar: bool = true,
            show_event_icon: bool = true,
            show_timestamp: bool = true,
            timestamp_format: TimestampFormat = TimestampFormat::Relative,
            timestamp_prefix: String = String::new(),
            show_location: bool = true,
            location_format: LocationFormat = LocationFormat::CityCountry,
            show_value: bool = true,
            value_format: ValueFormat = ValueFormat::Currency,
            /// ISO 4217 code.
            currency: String = "USD".to_string(),
            currency_position: CurrencyPosition = CurrencyPosition::Before,
            show_rating: bool = true,
            show_review_content: bool = true,
            /// Review excerpts longer than this many characters are truncated.
            review_max_length: u32 = 120,
            show_verified_badge: bool = true,
            verified_badge_text: String = "Verified".to_string(),
        }
        groups {}
    }
}

settings_group! {
    /// Anonymization and PII hiding.
    pub struct PrivacySettings / PartialPrivacySettings {
        leaves {
            anonymize_names: bool = false,
            anonymization_style: AnonymizationStyle = AnonymizationStyle::FirstInitial,
            hide_emails: bool = true,
            hide_phone_numbers: bool = true,
        }
        groups {}
    }
}

settings_group! {
    /// Click and hover behavior.
    pub struct InteractionSettings / PartialInteractionSettings {
        leaves {
            clickable: bool = false,
            click_action: ClickAction = ClickAction::None,
            destination_url: String = String::new(),
            open_in_new_tab: bool = true,
            show_close_button: bool = true,
            pause_on_hover: bool = true,
            expand_on_hover: bool = false,
        }
        groups {}
    }
}

settings_group! {
    /// Device visibility and mobile overrides.
    pub struct ResponsiveSettings / PartialResponsiveSettings {
        leaves {
            hide_on_mobile: bool = false,
            hide_on_desktop: bool = false,
            mobile_position: MobilePosition = MobilePosition::Bottom,
            mobile_max_width: u32 = 340,
        }
        groups {}
    }
}

settings_group! {
    /// All display settings of a widget.
    pub struct DisplaySettings / PartialDisplaySettings {
        leaves {}
        groups {
            duration: DurationSettings / PartialDurationSettings,
            content: ContentSettings / PartialContentSettings,
            privacy: PrivacySettings / PartialPrivacySettings,
            interaction: InteractionSettings / PartialInteractionSettings,
            responsive: ResponsiveSettings / PartialResponsiveSettings,
        }
    }
}
