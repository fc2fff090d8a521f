//! Proof Widgets - configuration core for social proof notification widgets.
//!
//! The crate owns the widget settings schema and its merge-with-defaults
//! semantics ([`models`]), the built-in templates and design presets
//! ([`catalog`]), the SQLite-backed store adapter ([`db`], [`services`]) and
//! the derivation engine that turns a configuration plus an event into
//! display-ready values ([`render`]).
//!
//! Logging goes through the `log` facade; the host application installs
//! the logger.

pub mod catalog;
pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod services;

pub use error::AppError;
pub use models::WidgetConfiguration;
pub use services::{ConfigStore, EditorSession};
