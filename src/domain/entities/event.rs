use std::fmt;

/// IRC command name for an ordinary chat line
pub const PRIVMSG: &str = "PRIVMSG";
/// IRC command name for a channel join
pub const JOIN: &str = "JOIN";

/// Normalized view of one inbound chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub command: String,
    /// Channel name, the bot's own nick for private messages, or anything else
    pub recipient: String,
    pub sender: String,
    pub message: String,
}

impl Event {
    pub fn new(
        command: impl Into<String>,
        recipient: impl Into<String>,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            recipient: recipient.into(),
            sender: sender.into(),
            message: message.into(),
        }
    }

    pub fn privmsg(sender: impl Into<String>, recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(PRIVMSG, recipient, sender, message)
    }

    pub fn join(sender: impl Into<String>, channel: impl Into<String>) -> Self {
        Self::new(JOIN, channel, sender, "")
    }

    pub fn is_join(&self) -> bool {
        self.command.eq_ignore_ascii_case(JOIN)
    }

    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}: {}", self.command, self.sender, self.recipient, self.message)
    }
}
