//! Chat errors.

use thiserror::Error;

/// Errors raised while building a rule table or sending a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// A rule has no keywords and could never match.
    #[error("Rule {index} has no keywords")]
    EmptyRule { index: usize },

    /// A keyword is empty and would match every input.
    #[error("Rule {index} has an empty keyword")]
    EmptyKeyword { index: usize },

    /// The fallback template cannot echo the input.
    #[error("Fallback template must contain {{input}}")]
    FallbackWithoutInput,

    /// Nothing to send.
    #[error("Message is empty")]
    EmptyMessage,
}
