//! Derivation engine: configuration + event in, display-ready values out.
//!
//! Everything here is pure and total. A formatting problem yields a
//! fallback string; nothing in this module returns an error.

pub mod format;
pub mod identity;
pub mod notification;
pub mod sample;
pub mod style;

pub use format::{format_display_value, format_location, format_timestamp, EventValue};
pub use identity::{anonymize_name, display_name, get_initials, redact_pii};
pub use notification::{compose_meta_line, render_notification, RenderedNotification};
pub use sample::{get_template_sample, SampleEvent};
pub use style::{animation_params, position_css, shadow_css, Viewport};
