//! Visual design settings: placement, layout, border, shadow and background.

use crate::models::merge::settings_group;
use serde::{Deserialize, Serialize};

/// Screen corner or edge the notification is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
    BottomCenter,
    TopCenter,
}

impl Position {
    /// Whether the notification is anchored to the top edge.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::TopCenter)
    }

    /// Whether the notification is horizontally centered.
    pub fn is_centered(self) -> bool {
        matches!(self, Self::TopCenter | Self::BottomCenter)
    }

    /// Whether the notification is anchored to the left edge.
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }
}

/// Overall card layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    #[default]
    Card,
    Compact,
    Minimal,
    Banner,
}

/// Drop shadow strength.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShadowSize {
    None,
    Sm,
    Md,
    #[default]
    Lg,
    Xl,
}

settings_group! {
    /// Where the notification sits on the page.
    pub struct PositionSettings / PartialPositionSettings {
        leaves {
            position: Position = Position::BottomLeft,
            /// Horizontal distance from the anchored edge, in pixels.
            offset_x: i32 = 20,
            /// Vertical distance from the anchored edge, in pixels.
            offset_y: i32 = 20,
            z_index: u32 = 9999,
        }
        groups {}
    }
}

settings_group! {
    /// Card dimensions and layout style.
    pub struct LayoutSettings / PartialLayoutSettings {
        leaves {
            layout_style: LayoutStyle = LayoutStyle::Card,
            max_width: u32 = 380,
            min_width: u32 = 280,
            padding: u32 = 16,
            avatar_size: u32 = 48,
        }
        groups {}
    }
}

settings_group! {
    /// Border and left accent stripe.
    pub struct BorderSettings / PartialBorderSettings {
        leaves {
            border_radius: u32 = 12,
            border_width: u32 = 1,
            border_color: String = "#e5e7eb".to_string(),
            border_left_accent: bool = true,
            border_left_accent_width: u32 = 4,
            border_left_accent_color: String = "#3b82f6".to_string(),
        }
        groups {}
    }
}

settings_group! {
    /// Shadow and glass effect.
    pub struct ShadowSettings / PartialShadowSettings {
        leaves {
            shadow: ShadowSize = ShadowSize::Lg,
            glassmorphism: bool = false,
            /// Backdrop blur radius in pixels, applied only with `glassmorphism`.
            backdrop_blur: u32 = 12,
        }
        groups {}
    }
}

settings_group! {
    /// Background and text colors.
    pub struct BackgroundSettings / PartialBackgroundSettings {
        leaves {
            background_color: String = "#ffffff".to_string(),
            /// 0.0 (transparent) to 1.0 (opaque).
            background_opacity: f64 = 1.0,
            text_color: String = "#111827".to_string(),
            secondary_text_color: String = "#6b7280".to_string(),
            accent_color: String = "#3b82f6".to_string(),
            gradient_enabled: bool = false,
            gradient_start: String = "#ffffff".to_string(),
            gradient_end: String = "#f3f4f6".to_string(),
        }
        groups {}
    }
}

settings_group! {
    /// All visual design settings of a widget.
    pub struct DesignSettings / PartialDesignSettings {
        leaves {}
        groups {
            position: PositionSettings / PartialPositionSettings,
            layout: LayoutSettings / PartialLayoutSettings,
            border: BorderSettings / PartialBorderSettings,
            shadow: ShadowSettings / PartialShadowSettings,
            background: BackgroundSettings / PartialBackgroundSettings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::merge::Settings;

    #[test]
    fn test_default_design() {
        let design = DesignSettings::default();
        assert_eq!(design.position.position, Position::BottomLeft);
        assert_eq!(design.position.offset_x, 20);
        assert_eq!(design.shadow.shadow, ShadowSize::Lg);
        assert!(design.border.border_left_accent);
    }

    #[test]
    fn test_position_serializes_kebab_case() {
        let json = serde_json::to_value(Position::TopCenter).unwrap();
        assert_eq!(json, "top-center");
    }

    #[test]
    fn test_unknown_position_keeps_default() {
        let design = DesignSettings::default()
            .merged_with_value(&serde_json::json!({"position": {"position": "middle", "offsetX": 5}}));
        assert_eq!(design.position.position, Position::BottomLeft);
        assert_eq!(design.position.offset_x, 5);
    }
}
