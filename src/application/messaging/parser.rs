//! Parser for commands addressed to the bot as `"<nick>! <verb> <args>"`

/// A command addressed to the bot by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BangCommand<'a> {
    pub verb: &'a str,
    /// Everything after the verb, trimmed
    pub args: &'a str,
}

impl<'a> BangCommand<'a> {
    /// Parse `text` if its first token is `nick!` (case-insensitive)
    pub fn parse(nick: &str, text: &'a str) -> Option<Self> {
        let (addressee, rest) = split_token(text);
        let name = addressee.strip_suffix('!')?;
        if name.is_empty() || !name.eq_ignore_ascii_case(nick) {
            return None;
        }

        let (verb, rest) = split_token(rest);
        if verb.is_empty() {
            return None;
        }

        Some(Self {
            verb,
            args: rest.trim(),
        })
    }

    /// Case-insensitive verb comparison
    pub fn is(&self, verb: &str) -> bool {
        self.verb.eq_ignore_ascii_case(verb)
    }

    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }
}

/// Split off the first whitespace-delimited token
fn split_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], &text[idx..]),
        None => (text, ""),
    }
}
