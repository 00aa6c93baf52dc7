use regex_lite::Regex;

/// Placeholder replaced with the sender's name when a response is sent
pub const NICK_PLACEHOLDER: &str = "${nick}";

/// A learned stimulus/response rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRule {
    pub pattern: String,
    pub response: String,
}

impl TriggerRule {
    pub fn new(pattern: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            response: response.into(),
        }
    }

    /// Compiles `pattern` anchored at the start of the input.
    ///
    /// The match does not have to consume the whole message.
    pub fn compile(pattern: &str) -> Result<Regex, regex_lite::Error> {
        Regex::new(&format!("^(?:{})", pattern))
    }

    /// Whether this rule fires for `message`. Patterns that no longer
    /// compile never match.
    pub fn matches(&self, message: &str) -> bool {
        match Self::compile(&self.pattern) {
            Ok(re) => re.is_match(message),
            Err(e) => {
                tracing::warn!("Skipping invalid trigger pattern {:?}: {}", self.pattern, e);
                false
            }
        }
    }

    /// Response text with `${nick}` substituted
    pub fn render(&self, nick: &str) -> String {
        self.response.replace(NICK_PLACEHOLDER, nick)
    }
}

/// First rule in `rules` matching `message`, rendered for `sender`
pub fn first_match<'a, I>(rules: I, message: &str, sender: &str) -> Option<String>
where
    I: IntoIterator<Item = &'a TriggerRule>,
{
    rules
        .into_iter()
        .find(|rule| rule.matches(message))
        .map(|rule| rule.render(sender))
}
