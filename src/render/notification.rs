//! Composition of one rendered notification.
//!
//! [`render_notification`] is the single entry point shared by the editor
//! preview and the on-site renderer: same configuration and event in, same
//! strings out.

use crate::models::display::{ContentSettings, ProgressBarPosition};
use crate::models::widget_config::WidgetConfiguration;
use crate::render::format::{format_display_value, format_location, format_timestamp, EventValue};
use crate::render::identity::{display_name, get_initials, redact_pii};
use crate::render::sample::SampleEvent;
use crate::render::style::{
    animation_params, background_css, border_css, position_css, shadow_css, visible_on,
    AnimationParams, BorderStyle, PositionCss, ShadowStyle, Viewport,
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Separator between the parts of the meta line.
pub const META_SEPARATOR: &str = " • ";

/// Join the timestamp and location the content settings allow, skipping empties.
pub fn compose_meta_line(timestamp: &str, location: &str, content: &ContentSettings) -> String {
    let parts = [
        (content.show_timestamp, timestamp.trim()),
        (content.show_location, location.trim()),
    ];
    parts
        .iter()
        .filter(|(shown, text)| *shown && !text.is_empty())
        .map(|(_, text)| *text)
        .collect::<Vec<_>>()
        .join(META_SEPARATOR)
}

/// Cut `text` to at most `max_chars` characters, adding an ellipsis when cut.
/// Zero means no limit.
pub fn truncate_review(text: &str, max_chars: u32) -> String {
    let text = text.trim();
    let max_chars = max_chars as usize;
    if max_chars == 0 || text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

/// Progress bar drawn while the notification is on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBar {
    pub color: String,
    pub position: ProgressBarPosition,
    pub duration_ms: u32,
}

/// Every value a renderer needs to paint one notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNotification {
    pub visible: bool,
    pub display_name: String,
    /// Avatar initials, present when the avatar is shown.
    pub initials: Option<String>,
    pub action: String,
    pub value: Option<String>,
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub verified_badge: Option<String>,
    pub meta_line: String,
    pub display_duration_ms: u32,
    pub progress_bar: Option<ProgressBar>,
    pub show_close_button: bool,
    /// Click-through target, when the card is clickable.
    pub link: Option<String>,
    pub open_in_new_tab: bool,
    pub animation: AnimationParams,
    pub shadow: ShadowStyle,
    pub border: BorderStyle,
    pub position: PositionCss,
    pub background: String,
    pub text_color: String,
    pub secondary_text_color: String,
}

/// Derive the rendered notification for `event` under `config` at `now`.
pub fn render_notification(
    config: &WidgetConfiguration,
    event: &SampleEvent,
    now: DateTime<Utc>,
    viewport: Viewport,
) -> RenderedNotification {
    let design = &config.design;
    let display = &config.display;
    let content = &display.content;
    let privacy = &display.privacy;

    let name = display_name(event.name, privacy);
    let initials = content.show_avatar.then(|| get_initials(&name));

    let value = event.value.filter(|_| content.show_value).map(|v| {
        format_display_value(
            &EventValue::from(v),
            content.value_format,
            &content.currency,
            content.currency_position,
        )
    });

    let rating = event.rating.filter(|_| content.show_rating);
    let review = event
        .review
        .filter(|_| content.show_review_content)
        .map(|text| truncate_review(&redact_pii(text, privacy), content.review_max_length))
        .filter(|text| !text.is_empty());

    let verified_badge = (content.show_verified_badge && !content.verified_badge_text.trim().is_empty())
        .then(|| content.verified_badge_text.trim().to_string());

    let occurred_at = now - Duration::minutes(event.minutes_ago.max(0));
    let timestamp = format_timestamp(
        occurred_at,
        now,
        content.timestamp_format,
        &content.timestamp_prefix,
    );
    let location = format_location(event.city, event.country, content.location_format);
    let meta_line = compose_meta_line(&timestamp, &location, content);

    let display_duration_ms = display.duration.display_duration.saturating_mul(1000);
    let progress_bar = display.duration.show_progress_bar.then(|| ProgressBar {
        color: display.duration.progress_bar_color.clone(),
        position: display.duration.progress_bar_position,
        duration_ms: display_duration_ms,
    });

    let interaction = &display.interaction;
    let link = (interaction.clickable && !interaction.destination_url.trim().is_empty())
        .then(|| interaction.destination_url.trim().to_string());

    RenderedNotification {
        visible: config.is_active && visible_on(&display.responsive, viewport),
        display_name: name,
        initials,
        action: redact_pii(event.action, privacy),
        value,
        rating,
        review,
        verified_badge,
        meta_line,
        display_duration_ms,
        progress_bar,
        show_close_button: interaction.show_close_button,
        link,
        open_in_new_tab: interaction.open_in_new_tab,
        animation: animation_params(&display.duration, design.position.position),
        shadow: shadow_css(&design.shadow),
        border: border_css(&design.border),
        position: position_css(&design.position, &display.responsive, viewport),
        background: background_css(&design.background),
        text_color: design.background.text_color.clone(),
        secondary_text_color: design.background.secondary_text_color.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::display::{AnonymizationStyle, LocationFormat, TimestampFormat};
    use crate::render::sample::get_template_sample;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 18, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_meta_line() {
        let content = ContentSettings::default();
        assert_eq!(
            compose_meta_line("2 minutes ago", "New York, US", &content),
            "2 minutes ago • New York, US"
        );
        assert_eq!(compose_meta_line("2 minutes ago", "", &content), "2 minutes ago");
        assert_eq!(compose_meta_line("", "", &content), "");

        let no_time = ContentSettings {
            show_timestamp: false,
            ..ContentSettings::default()
        };
        assert_eq!(compose_meta_line("2 minutes ago", "Austin", &no_time), "Austin");
    }

    #[test]
    fn test_truncate_review() {
        assert_eq!(truncate_review("short", 120), "short");
        assert_eq!(truncate_review("Great product overall", 13), "Great product…");
        assert_eq!(truncate_review("Great product overall", 0), "Great product overall");
    }

    #[test]
    fn test_render_default_purchase() {
        let config = WidgetConfiguration::default();
        let rendered = render_notification(
            &config,
            get_template_sample("recent_purchase"),
            now(),
            Viewport::Desktop,
        );

        assert!(rendered.visible);
        assert_eq!(rendered.display_name, "Sarah Johnson");
        assert_eq!(rendered.initials.as_deref(), Some("SJ"));
        assert_eq!(rendered.action, "purchased Premium Plan");
        assert_eq!(rendered.value.as_deref(), Some("$49.99"));
        assert_eq!(rendered.meta_line, "2 minutes ago • New York, US");
        assert_eq!(rendered.display_duration_ms, 8000);
        assert_eq!(rendered.verified_badge.as_deref(), Some("Verified"));
        assert!(rendered.progress_bar.is_some());
        assert_eq!(rendered.link, None);
    }

    #[test]
    fn test_render_respects_privacy_and_content() {
        let mut config = WidgetConfiguration::default();
        config.display.privacy.anonymize_names = true;
        config.display.privacy.anonymization_style = AnonymizationStyle::FirstLastInitial;
        config.display.content.show_value = false;
        config.display.content.show_avatar = false;
        config.display.content.timestamp_format = TimestampFormat::Absolute;
        config.display.content.timestamp_prefix = "Ordered".to_string();
        config.display.content.location_format = LocationFormat::FlagEmoji;

        let rendered = render_notification(
            &config,
            get_template_sample("purchase"),
            now(),
            Viewport::Desktop,
        );
        assert_eq!(rendered.display_name, "S. J.");
        assert_eq!(rendered.initials, None);
        assert_eq!(rendered.value, None);
        assert_eq!(rendered.meta_line, "Ordered Oct 18, 2:28 PM • 🇺🇸");
    }

    #[test]
    fn test_render_review() {
        let mut config = WidgetConfiguration::default();
        config.display.content.review_max_length = 21;

        let rendered = render_notification(
            &config,
            get_template_sample("product_review"),
            now(),
            Viewport::Desktop,
        );
        assert_eq!(rendered.rating, Some(5));
        assert_eq!(rendered.review.as_deref(), Some("Absolutely love these…"));
        assert_eq!(rendered.value, None);
    }

    #[test]
    fn test_render_hidden_and_inactive() {
        let mut config = WidgetConfiguration::default();
        config.display.responsive.hide_on_mobile = true;
        let sample = get_template_sample("signup");

        assert!(render_notification(&config, sample, now(), Viewport::Desktop).visible);
        assert!(!render_notification(&config, sample, now(), Viewport::Mobile).visible);

        config.is_active = false;
        assert!(!render_notification(&config, sample, now(), Viewport::Desktop).visible);
    }

    #[test]
    fn test_render_link_when_clickable() {
        let mut config = WidgetConfiguration::default();
        config.display.interaction.clickable = true;
        config.display.interaction.destination_url = " https://shop.example/sale ".to_string();

        let rendered = render_notification(
            &config,
            get_template_sample("recent_purchase"),
            now(),
            Viewport::Desktop,
        );
        assert_eq!(rendered.link.as_deref(), Some("https://shop.example/sale"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = WidgetConfiguration::default();
        let sample = get_template_sample("donation");
        assert_eq!(
            render_notification(&config, sample, now(), Viewport::Mobile),
            render_notification(&config, sample, now(), Viewport::Mobile)
        );
    }
}
