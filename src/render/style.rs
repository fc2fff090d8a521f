//! CSS-level parameters derived from design and timing settings.

use crate::models::design::{
    BackgroundSettings, BorderSettings, Position, PositionSettings, ShadowSettings, ShadowSize,
};
use crate::models::display::{AnimationType, DurationSettings, MobilePosition, ResponsiveSettings};
use serde::Serialize;

/// Which layout the notification is painted for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

/// Entrance animation of one notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationParams {
    pub animation: AnimationType,
    /// Zero when animation is off.
    pub duration_ms: u32,
    pub easing: &'static str,
    /// Transform the card starts from before settling at `none`.
    pub enter_transform: String,
    pub enter_opacity: f64,
}

const EASE_OUT: &str = "cubic-bezier(0.16, 1, 0.3, 1)";
const EASE_BOUNCE: &str = "cubic-bezier(0.68, -0.55, 0.265, 1.55)";

/// Animation parameters; slide and bounce enter from the anchored edge.
pub fn animation_params(duration: &DurationSettings, position: Position) -> AnimationParams {
    let duration_ms = duration.animation_speed.duration_ms();
    let (easing, enter_transform, enter_opacity, duration_ms) = match duration.animation_type {
        AnimationType::Slide => {
            let transform = if position.is_centered() {
                if position.is_top() {
                    "translateY(-120%)"
                } else {
                    "translateY(120%)"
                }
            } else if position.is_left() {
                "translateX(-120%)"
            } else {
                "translateX(120%)"
            };
            (EASE_OUT, transform, 1.0, duration_ms)
        }
        AnimationType::Fade => ("ease-out", "none", 0.0, duration_ms),
        AnimationType::Bounce => {
            let transform = if position.is_top() {
                "translateY(-20px)"
            } else {
                "translateY(20px)"
            };
            (EASE_BOUNCE, transform, 0.0, duration_ms)
        }
        AnimationType::Zoom => (EASE_OUT, "scale(0.8)", 0.0, duration_ms),
        AnimationType::None => ("linear", "none", 1.0, 0),
    };

    AnimationParams {
        animation: duration.animation_type,
        duration_ms,
        easing,
        enter_transform: enter_transform.to_string(),
        enter_opacity,
    }
}

/// Shadow and optional glass blur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowStyle {
    pub box_shadow: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_filter: Option<String>,
}

pub fn shadow_css(shadow: &ShadowSettings) -> ShadowStyle {
    let box_shadow = match shadow.shadow {
        ShadowSize::None => "none",
        ShadowSize::Sm => "0 1px 2px 0 rgba(0, 0, 0, 0.05)",
        ShadowSize::Md => "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -2px rgba(0, 0, 0, 0.1)",
        ShadowSize::Lg => "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -4px rgba(0, 0, 0, 0.1)",
        ShadowSize::Xl => "0 20px 25px -5px rgba(0, 0, 0, 0.1), 0 8px 10px -6px rgba(0, 0, 0, 0.1)",
    };
    let backdrop_filter = shadow
        .glassmorphism
        .then(|| format!("blur({}px)", shadow.backdrop_blur));

    ShadowStyle {
        box_shadow,
        backdrop_filter,
    }
}

/// Fixed-position placement of the card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionCss {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    pub z_index: u32,
}

impl PositionCss {
    /// Inline declarations, e.g. `position: fixed; bottom: 20px; left: 20px; z-index: 9999`.
    pub fn to_declarations(&self) -> String {
        let mut decls = vec!["position: fixed".to_string()];
        let props = [
            ("top", &self.top),
            ("bottom", &self.bottom),
            ("left", &self.left),
            ("right", &self.right),
            ("transform", &self.transform),
            ("max-width", &self.max_width),
        ];
        for (name, value) in props {
            if let Some(value) = value {
                decls.push(format!("{}: {}", name, value));
            }
        }
        decls.push(format!("z-index: {}", self.z_index));
        decls.join("; ")
    }
}

fn px(value: i32) -> String {
    format!("{}px", value)
}

/// Placement for `viewport`. On mobile the card is centered on the
/// configured mobile edge and capped at the mobile width.
pub fn position_css(
    position: &PositionSettings,
    responsive: &ResponsiveSettings,
    viewport: Viewport,
) -> PositionCss {
    let mut css = PositionCss {
        z_index: position.z_index,
        ..PositionCss::default()
    };

    let (is_top, centered) = match viewport {
        Viewport::Desktop => (position.position.is_top(), position.position.is_centered()),
        Viewport::Mobile => {
            css.max_width = Some(format!("{}px", responsive.mobile_max_width));
            (responsive.mobile_position == MobilePosition::Top, true)
        }
    };

    if is_top {
        css.top = Some(px(position.offset_y));
    } else {
        css.bottom = Some(px(position.offset_y));
    }

    if centered {
        css.left = Some("50%".to_string());
        css.transform = Some("translateX(-50%)".to_string());
    } else if position.position.is_left() {
        css.left = Some(px(position.offset_x));
    } else {
        css.right = Some(px(position.offset_x));
    }

    css
}

/// Whether the widget shows at all on `viewport`.
pub fn visible_on(responsive: &ResponsiveSettings, viewport: Viewport) -> bool {
    match viewport {
        Viewport::Desktop => !responsive.hide_on_desktop,
        Viewport::Mobile => !responsive.hide_on_mobile,
    }
}

/// Border shorthand values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderStyle {
    pub border: String,
    pub border_radius: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<String>,
}

pub fn border_css(border: &BorderSettings) -> BorderStyle {
    let style = |width: u32, color: &str| {
        if width == 0 {
            "none".to_string()
        } else {
            format!("{}px solid {}", width, color)
        }
    };

    BorderStyle {
        border: style(border.border_width, &border.border_color),
        border_radius: format!("{}px", border.border_radius),
        border_left: border
            .border_left_accent
            .then(|| style(border.border_left_accent_width, &border.border_left_accent_color)),
    }
}

/// `#rgb` or `#rrggbb` to its components.
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// CSS `background` value. Opacity below 1 turns a hex color into `rgba()`;
/// other color syntaxes pass through unchanged.
pub fn background_css(background: &BackgroundSettings) -> String {
    if background.gradient_enabled {
        return format!(
            "linear-gradient(135deg, {}, {})",
            background.gradient_start, background.gradient_end
        );
    }

    let opacity = if background.background_opacity.is_finite() {
        background.background_opacity.clamp(0.0, 1.0)
    } else {
        1.0
    };
    if opacity >= 1.0 {
        return background.background_color.clone();
    }

    match parse_hex_color(&background.background_color) {
        Some((r, g, b)) => {
            let alpha = (opacity * 100.0).round() / 100.0;
            format!("rgba({}, {}, {}, {})", r, g, b, alpha)
        }
        None => background.background_color.clone(),
    }
}
