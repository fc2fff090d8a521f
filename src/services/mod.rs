//! Stateful services: the store adapter, editor sessions and visitor polling.
//!
//! Pure formatting lives in [`crate::render`]; everything here touches the
//! store or a background task.

pub mod config_store;
pub mod editor_session;
pub mod visitor_poll;

pub use config_store::ConfigStore;
pub use editor_session::EditorSession;
pub use visitor_poll::{start_polling, PollConfig, PollHandle};
