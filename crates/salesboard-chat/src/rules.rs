//! Keyword rules and response selection.
//!
//! Input is lower-cased, then rules are tried in declaration order. The first
//! rule with any keyword contained in the input supplies the reply. When no
//! rule matches, the fallback template is rendered with the original input.

use serde::{Deserialize, Serialize};

use salesboard_core::{ChatConfig, RuleConfig};

use crate::error::ChatError;

/// Placeholder replaced with the user's text in fallback templates.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Fallback used when no rule matches.
pub const DEFAULT_FALLBACK: &str =
    "I understand you're asking about: {input}. How can I help you with sales-related tasks?";

/// One keyword rule with its static response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRule {
    keywords: Vec<String>,
    response: String,
}

impl ResponseRule {
    /// Build a rule. Keywords are lower-cased; an empty set or an empty keyword
    /// is rejected.
    pub fn new<I, S>(keywords: I, response: impl Into<String>) -> Result<Self, ChatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::at(0, keywords, response)
    }

    fn at<I, S>(index: usize, keywords: I, response: impl Into<String>) -> Result<Self, ChatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();

        if keywords.is_empty() {
            return Err(ChatError::EmptyRule { index });
        }
        if keywords.iter().any(|k| k.is_empty()) {
            return Err(ChatError::EmptyKeyword { index });
        }

        Ok(Self {
            keywords,
            response: response.into(),
        })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    /// Whether any keyword occurs in already lower-cased input.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}

/// The first rule matching `input`, if any.
pub fn select<'a>(input: &str, rules: &'a [ResponseRule]) -> Option<&'a ResponseRule> {
    let normalized = input.to_lowercase();
    rules.iter().find(|rule| rule.matches(&normalized))
}

/// Reply for `input` using the default fallback.
pub fn respond(input: &str, rules: &[ResponseRule]) -> String {
    match select(input, rules) {
        Some(rule) => rule.response.clone(),
        None => render_fallback(DEFAULT_FALLBACK, input),
    }
}

/// Substitute `input` into a fallback template.
pub fn render_fallback(template: &str, input: &str) -> String {
    template.replace(INPUT_PLACEHOLDER, input)
}

/// The built-in rule table.
pub fn default_rules() -> Vec<ResponseRule> {
    let table = [
        (
            "price",
            "I can help you with product pricing. Which product would you like to know about?",
        ),
        (
            "order",
            "I can assist with order management. Would you like to create a new order or check existing orders?",
        ),
        ("promotion", "Let me show you the current promotions available."),
        (
            "outlet",
            "I can provide outlet information. Which outlet are you interested in?",
        ),
    ];

    table
        .into_iter()
        .map(|(keyword, response)| ResponseRule {
            keywords: vec![keyword.to_string()],
            response: response.to_string(),
        })
        .collect()
}

// =============================================================================
// RuleSet
// =============================================================================

/// An ordered rule table with its fallback template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ResponseRule>,
    fallback: String,
}

impl RuleSet {
    /// Rules with the default fallback.
    pub fn new(rules: Vec<ResponseRule>) -> Self {
        Self {
            rules,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    /// Replace the fallback template. It must contain `{input}`.
    pub fn with_fallback(mut self, template: impl Into<String>) -> Result<Self, ChatError> {
        let template = template.into();
        if !template.contains(INPUT_PLACEHOLDER) {
            return Err(ChatError::FallbackWithoutInput);
        }
        self.fallback = template;
        Ok(self)
    }

    /// Build from the `[chat]` config section.
    ///
    /// An empty `rules` list keeps the built-in table.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        let rules = if config.rules.is_empty() {
            default_rules()
        } else {
            config
                .rules
                .iter()
                .enumerate()
                .map(|(index, RuleConfig { keywords, response })| {
                    ResponseRule::at(index, keywords, response.clone())
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let set = Self::new(rules);
        let set = match &config.fallback {
            Some(template) => set.with_fallback(template.clone())?,
            None => set,
        };

        tracing::info!("Loaded {} response rules", set.len());
        Ok(set)
    }

    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Reply for `input`.
    pub fn respond(&self, input: &str) -> String {
        match select(input, &self.rules) {
            Some(rule) => {
                tracing::debug!("Input matched rule {:?}", rule.keywords);
                rule.response.clone()
            }
            None => {
                tracing::debug!("No rule matched, using fallback");
                render_fallback(&self.fallback, input)
            }
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(keywords: &[&str], response: &str) -> ResponseRule {
        ResponseRule::new(keywords.iter().copied(), response).unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let rules = vec![rule(&["order"], "R1"), rule(&["orders total"], "R2")];
        assert_eq!(respond("show my orders total", &rules), "R1");
    }

    #[test]
    fn test_any_keyword_matches() {
        let rules = vec![rule(&["price", "cost"], "pricing")];
        assert_eq!(respond("what does it cost?", &rules), "pricing");
        assert_eq!(respond("Price list please", &rules), "pricing");
    }

    #[test]
    fn test_input_is_lowercased() {
        let rules = default_rules();
        assert_eq!(
            respond("PROMOTION", &rules),
            "Let me show you the current promotions available."
        );
    }

    #[test]
    fn test_keywords_lowercased_at_construction() {
        let rules = vec![rule(&["Outlet"], "outlets")];
        assert_eq!(rules[0].keywords(), ["outlet"]);
        assert_eq!(respond("which outlet?", &rules), "outlets");
    }

    #[test]
    fn test_fallback_embeds_input_verbatim() {
        let reply = respond("xyzzy not a real topic", &default_rules());
        assert_eq!(
            reply,
            "I understand you're asking about: xyzzy not a real topic. How can I help you with sales-related tasks?"
        );
    }

    #[test]
    fn test_fallback_keeps_original_case() {
        let reply = respond("Hello There", &[]);
        assert!(reply.contains("Hello There"));
    }

    #[test]
    fn test_respond_is_deterministic() {
        let rules = default_rules();
        for input in ["order status", "xyzzy", "", "Outlet PRICE"] {
            assert_eq!(respond(input, &rules), respond(input, &rules));
        }
    }

    #[test]
    fn test_default_table_precedence() {
        // "price" precedes "order" in the table.
        let reply = respond("order price", &default_rules());
        assert!(reply.starts_with("I can help you with product pricing"));
    }

    #[test]
    fn test_rejects_empty_rules() {
        let empty: [&str; 0] = [];
        assert_eq!(
            ResponseRule::new(empty, "x"),
            Err(ChatError::EmptyRule { index: 0 })
        );
        assert_eq!(
            ResponseRule::new(["ok", ""], "x"),
            Err(ChatError::EmptyKeyword { index: 0 })
        );
    }

    #[test]
    fn test_custom_fallback() {
        let set = RuleSet::default()
            .with_fallback("Sorry, no idea about {input}")
            .unwrap();
        assert_eq!(set.respond("weather"), "Sorry, no idea about weather");

        let result = RuleSet::default().with_fallback("Sorry");
        assert_eq!(result, Err(ChatError::FallbackWithoutInput));
    }

    #[test]
    fn test_from_config_defaults() {
        let set = RuleSet::from_config(&ChatConfig::default()).unwrap();
        assert_eq!(set, RuleSet::default());
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_from_config_custom_rules() {
        let config = ChatConfig {
            rules: vec![
                RuleConfig {
                    keywords: vec!["Stock".to_string()],
                    response: "Stock levels are on the products page.".to_string(),
                },
                RuleConfig {
                    keywords: vec![],
                    response: "never".to_string(),
                },
            ],
            ..ChatConfig::default()
        };
        assert_eq!(
            RuleSet::from_config(&config),
            Err(ChatError::EmptyRule { index: 1 })
        );

        let config = ChatConfig {
            rules: config.rules[..1].to_vec(),
            fallback: Some("Ask me about stock, not {input}".to_string()),
            ..ChatConfig::default()
        };
        let set = RuleSet::from_config(&config).unwrap();
        assert_eq!(set.respond("low STOCK items"), "Stock levels are on the products page.");
        assert_eq!(set.respond("orders"), "Ask me about stock, not orders");
    }
}
