//! Command handlers for the kindred CLI

pub mod config;
pub mod document;
pub mod related;

pub use config::handle_config_command;
pub use document::handle_show_command;
pub use related::{compute_related_json, handle_related_command};
