//! Notification dispatcher, recipient rules and message formatting.

pub mod formatter;
pub mod rules;
pub mod service;

pub use formatter::{NotificationDraft, NotificationFormatter};
pub use rules::NotificationRules;
pub use service::NotificationService;
