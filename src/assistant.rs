use std::sync::Arc;
use std::time::Duration;

use log::debug;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::delay::DelayedTasks;

pub const GREETING: &str = "Hi! I'm your AI learning assistant. How can I help you today?";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

const ASSISTANT_RESPONSES: &[&str] = &[
    "I'm here to help you learn! What would you like to explore today?",
    "Great question! Let me guide you through this concept step by step.",
    "I notice you might be struggling with this topic. Would you like me to break it down differently?",
    "You're making excellent progress! Keep up the great work!",
    "That's a common misconception. Let me clarify this for you.",
    "I see you're curious about this topic. Here's what you should know...",
];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AssistantMessage {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub text: String,
}

/// Floating help chat. Replies arrive after a delay and are dropped if the
/// assistant goes away first.
pub struct FloatingAssistant<R: Rng> {
    rng: R,
    reply_delay: Duration,
    is_open: bool,
    messages: Arc<Mutex<Vec<AssistantMessage>>>,
    pending: DelayedTasks,
}

impl<R: Rng> FloatingAssistant<R> {
    pub fn new(rng: R, reply_delay: Duration) -> Self {
        Self {
            rng,
            reply_delay,
            is_open: false,
            messages: Arc::new(Mutex::new(vec![AssistantMessage {
                speaker: Speaker::Assistant,
                text: GREETING.to_string(),
            }])),
            pending: DelayedTasks::new(),
        }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn messages(&self) -> Vec<AssistantMessage> {
        self.messages.lock().clone()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.pending()
    }

    /// Drops every reply that has not arrived yet.
    pub fn cancel_pending(&mut self) {
        self.pending.cancel_all();
    }

    /// Posts the user's message and schedules a reply. Blank input is ignored.
    /// Must be called inside a Tokio runtime.
    pub fn send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.messages.lock().push(AssistantMessage {
            speaker: Speaker::User,
            text: text.to_string(),
        });

        let reply = ASSISTANT_RESPONSES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(GREETING)
            .to_string();
        debug!("Assistant reply scheduled in {:?}", self.reply_delay);

        let messages = self.messages.clone();
        self.pending.schedule(self.reply_delay, move || {
            messages.lock().push(AssistantMessage {
                speaker: Speaker::Assistant,
                text: reply,
            });
        });

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assistant() -> FloatingAssistant<StdRng> {
        FloatingAssistant::new(StdRng::seed_from_u64(5), DEFAULT_REPLY_DELAY)
    }

    #[test]
    fn test_starts_with_greeting() {
        let assistant = assistant();
        let messages = assistant.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, GREETING);
        assert!(!assistant.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let mut assistant = assistant();
        assistant.open();
        assert!(assistant.send("How do I study for finals?"));
        assert_eq!(assistant.messages().len(), 2);
        assert_eq!(assistant.pending_replies(), 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let messages = assistant.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].speaker, Speaker::Assistant);
        assert!(ASSISTANT_RESPONSES.contains(&messages[2].text.as_str()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending() {
        let mut assistant = assistant();
        assistant.send("first");
        assistant.send("second");
        assert_eq!(assistant.pending_replies(), 2);

        assistant.cancel_pending();
        assert_eq!(assistant.pending_replies(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(assistant.messages().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_and_dropped() {
        let mut assistant = assistant();
        assert!(!assistant.send(" "));

        assistant.send("hello");
        let messages = assistant.messages.clone();
        drop(assistant);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(messages.lock().len(), 2);
    }
}
