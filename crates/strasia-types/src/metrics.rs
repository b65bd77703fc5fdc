//! Derived conversation metrics.

use serde::{Deserialize, Serialize};

/// Read-only counters derived from a session's messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub user_messages: usize,
    pub assistant_messages: usize,
    /// Whether any assistant reply carried a booking marker.
    pub booking_offered: bool,
}

impl SessionMetrics {
    pub fn booking_label(&self) -> &'static str {
        if self.booking_offered { "Yes" } else { "No" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let metrics = SessionMetrics::default();
        assert_eq!(metrics.user_messages, 0);
        assert_eq!(metrics.assistant_messages, 0);
        assert!(!metrics.booking_offered);
        assert_eq!(metrics.booking_label(), "No");
    }

    #[test]
    fn test_serialize_snake_case() {
        let metrics = SessionMetrics {
            user_messages: 2,
            assistant_messages: 2,
            booking_offered: true,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("\"booking_offered\":true"));
        assert_eq!(metrics.booking_label(), "Yes");
    }
}
