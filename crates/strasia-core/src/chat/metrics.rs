//! Conversation analysis over the message history.
//!
//! `booking_offered` is a literal text scan for marker tokens in assistant
//! replies. The markers look like template placeholders the agent was meant
//! to substitute upstream, so a real scheduling link or address will not be
//! detected. Kept as-is for compatibility with existing transcripts.

use strasia_types::chat::ChatMessage;
use strasia_types::metrics::SessionMetrics;

/// Substrings that mark a reply as offering a booking (case-sensitive).
pub const BOOKING_MARKERS: [&str; 2] = ["CALENDLY_LINK", "EMAIL"];

pub fn compute(messages: &[ChatMessage]) -> SessionMetrics {
    let mut metrics = SessionMetrics::default();
    for message in messages {
        if message.is_user() {
            metrics.user_messages += 1;
        } else {
            metrics.assistant_messages += 1;
            if contains_booking_marker(&message.content) {
                metrics.booking_offered = true;
            }
        }
    }
    metrics
}

pub fn contains_booking_marker(content: &str) -> bool {
    BOOKING_MARKERS.iter().any(|marker| content.contains(marker))
}
