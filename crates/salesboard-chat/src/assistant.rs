//! Chat session: the log plus the responder that answers into it.

use std::sync::Arc;

use salesboard_core::{ChatConfig, ChatMessage, Role};

use crate::error::ChatError;
use crate::log::ObservableChatLog;
use crate::pacing::{PacedResponder, Responder};
use crate::rules::RuleSet;

/// One chat session.
///
/// `send` appends the user's message at once, then the reply when the
/// responder resolves. Subscribers of the log see both appends.
pub struct Assistant {
    log: Arc<ObservableChatLog>,
    responder: Arc<dyn Responder>,
}

impl Assistant {
    pub fn new(log: Arc<ObservableChatLog>, responder: Arc<dyn Responder>) -> Self {
        Self { log, responder }
    }

    /// A fresh session using the configured rules and reply delay.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        let rules = Arc::new(RuleSet::from_config(config)?);
        let responder = PacedResponder::new(rules, config.reply_delay());
        Ok(Self::new(Arc::new(ObservableChatLog::new()), Arc::new(responder)))
    }

    pub fn log(&self) -> Arc<ObservableChatLog> {
        self.log.clone()
    }

    /// Send a user message and wait for the reply.
    ///
    /// Blank input is rejected without touching the log. Returns the
    /// assistant's message.
    pub async fn send(&self, text: impl Into<String>) -> Result<ChatMessage, ChatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.log.append(Role::User, text.clone());
        let reply = self.responder.reply(text).await;
        Ok(self.log.append(Role::Assistant, reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn paced(delay_ms: u64) -> Assistant {
        let config = ChatConfig {
            reply_delay_ms: delay_ms,
            ..ChatConfig::default()
        };
        Assistant::from_config(&config).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_appends_user_then_reply() {
        let assistant = paced(800);
        let reply = assistant.send("Where is my order?").await.unwrap();

        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.text.starts_with("I can assist with order management"));

        let log = assistant.log().messages();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].role, Role::User);
        assert_eq!(log[0].text, "Where is my order?");
        assert_eq!(log[1], reply);
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_message_visible_during_delay() {
        let assistant = Arc::new(paced(800));
        let mut rx = assistant.log().subscribe();

        let start = tokio::time::Instant::now();
        let task = {
            let assistant = assistant.clone();
            tokio::spawn(async move { assistant.send("xyzzy").await })
        };

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
        assert_eq!(assistant.log().len(), 1);

        let reply = task.await.unwrap().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));
        assert!(reply.text.contains("xyzzy"));
        assert_eq!(assistant.log().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let assistant = paced(0);
        assert_eq!(assistant.send("   ").await, Err(ChatError::EmptyMessage));
        assert!(assistant.log().is_empty());
    }

    #[tokio::test]
    async fn test_custom_responder() {
        let rules = RuleSet::default();
        let assistant = Assistant::new(Arc::new(ObservableChatLog::new()), Arc::new(rules));
        let reply = assistant.send("PRICE of pepsi").await.unwrap();
        assert!(reply.text.contains("product pricing"));
    }
}
