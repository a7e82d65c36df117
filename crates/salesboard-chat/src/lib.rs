//! Rule-based chat assistant for salesboard.
//!
//! - `rules`: keyword rules and first-match response selection
//! - `log`: append-only, observable chat log
//! - `pacing`: the async `Responder` seam and delayed replies
//! - `assistant`: a session tying the log to a responder

pub mod assistant;
pub mod error;
pub mod log;
pub mod pacing;
pub mod rules;

pub use assistant::Assistant;
pub use error::ChatError;
pub use log::{Clock, ObservableChatLog, SystemClock};
pub use pacing::{PacedResponder, Responder};
pub use rules::{
    default_rules, render_fallback, respond, select, ResponseRule, RuleSet, DEFAULT_FALLBACK,
    INPUT_PLACEHOLDER,
};
