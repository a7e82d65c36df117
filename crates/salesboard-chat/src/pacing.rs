//! Reply pacing.
//!
//! `Responder` is the async seam between a chat session and rule selection.
//! Selection stays synchronous; `PacedResponder` sleeps before running it so
//! the assistant appears to type.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use crate::rules::RuleSet;

/// Produces the assistant's reply to one user message.
pub trait Responder: Send + Sync {
    fn reply(&self, input: String) -> BoxFuture<'static, String>;
}

/// Immediate replies.
impl Responder for RuleSet {
    fn reply(&self, input: String) -> BoxFuture<'static, String> {
        Box::pin(futures::future::ready(self.respond(&input)))
    }
}

/// Replies from a rule set after a fixed delay.
#[derive(Debug, Clone)]
pub struct PacedResponder {
    rules: Arc<RuleSet>,
    delay: Duration,
}

impl PacedResponder {
    pub fn new(rules: Arc<RuleSet>, delay: Duration) -> Self {
        Self { rules, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Responder for PacedResponder {
    fn reply(&self, input: String) -> BoxFuture<'static, String> {
        let rules = self.rules.clone();
        let delay = self.delay;

        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            rules.respond(&input)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rule_set_replies_immediately() {
        let rules = RuleSet::default();
        let reply = rules.reply("any promotions?".to_string()).await;
        assert_eq!(reply, "Let me show you the current promotions available.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_paced_reply_waits_for_delay() {
        let responder =
            PacedResponder::new(Arc::new(RuleSet::default()), Duration::from_millis(800));
        let start = tokio::time::Instant::now();

        let reply = responder.reply("outlet list".to_string()).await;

        assert!(start.elapsed() >= Duration::from_millis(800));
        assert_eq!(reply, RuleSet::default().respond("outlet list"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_sleep() {
        let responder = PacedResponder::new(Arc::new(RuleSet::default()), Duration::ZERO);
        let start = tokio::time::Instant::now();
        responder.reply("price".to_string()).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
