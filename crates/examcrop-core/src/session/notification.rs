//! Transient success notification shown after a confirm in add mode.

use serde::Serialize;

/// A message that disappears on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    /// Host timestamp (ms) after which the notification is dismissed.
    pub expires_at_ms: f64,
}

impl Notification {
    pub fn new(message: impl Into<String>, now_ms: f64, lifetime_ms: f64) -> Self {
        Self {
            message: message.into(),
            expires_at_ms: now_ms + lifetime_ms,
        }
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms >= self.expires_at_ms
    }
}
