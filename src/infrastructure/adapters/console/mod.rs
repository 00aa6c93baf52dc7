//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::Event;
use crate::domain::traits::ChatSession;

/// Sender name for plain console input
pub const CONSOLE_USER: &str = "console";

/// Console chat session for local development.
///
/// Each stdin line is a channel message from `console`, except:
/// - `/msg <text>`: private message to the bot
/// - `/as <nick> <text>`: channel message from `nick`
/// - `/join <nick>`: `nick` joins the channel
/// - `/quit`: end the session
pub struct ConsoleSession {
    nick: String,
    channel: String,
    input: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleSession {
    pub fn new(nick: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            channel: channel.into(),
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Turn one input line into an event. `None` ends the session.
    pub fn parse_input(&self, line: &str) -> Option<Event> {
        let line = line.trim();
        if line == "/quit" {
            return None;
        }
        if let Some(text) = line.strip_prefix("/msg ") {
            return Some(Event::privmsg(CONSOLE_USER, &self.nick, text.trim()));
        }
        if let Some(nick) = line.strip_prefix("/join ") {
            return Some(Event::join(nick.trim(), &self.channel));
        }
        if let Some(rest) = line.strip_prefix("/as ") {
            if let Some((nick, text)) = rest.trim().split_once(' ') {
                return Some(Event::privmsg(nick, &self.channel, text.trim()));
            }
        }
        Some(Event::privmsg(CONSOLE_USER, &self.channel, line))
    }
}

#[async_trait]
impl ChatSession for ConsoleSession {
    fn nick(&self) -> &str {
        &self.nick
    }

    fn channel(&self) -> &str {
        &self.channel
    }

    async fn send_message(&self, text: &str, target: Option<&str>) -> Result<(), BotError> {
        println!("[{}] <{}> {}", target.unwrap_or(&self.channel), self.nick, text);
        Ok(())
    }

    async fn send_action(&self, text: &str) -> Result<(), BotError> {
        println!("[{}] * {} {}", self.channel, self.nick, text);
        Ok(())
    }

    async fn leave_channel(&self) -> Result<(), BotError> {
        println!("[{}] {} has left", self.channel, self.nick);
        Ok(())
    }

    async fn close(&self) -> Result<(), BotError> {
        tracing::info!("Console session closed");
        Ok(())
    }

    async fn next_event(&self) -> Result<Option<Event>, BotError> {
        let mut input = self.input.lock().await;
        while let Some(line) = input.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            return Ok(self.parse_input(&line));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        let console = ConsoleSession::new("HelperBot", "#bots");

        assert_eq!(
            console.parse_input("hello"),
            Some(Event::privmsg("console", "#bots", "hello"))
        );
        assert_eq!(
            console.parse_input("/msg list_commands"),
            Some(Event::privmsg("console", "HelperBot", "list_commands"))
        );
        assert_eq!(
            console.parse_input("/as alice hi there"),
            Some(Event::privmsg("alice", "#bots", "hi there"))
        );
        assert_eq!(console.parse_input("/join bob"), Some(Event::join("bob", "#bots")));
        assert_eq!(console.parse_input("/quit"), None);
    }
}
