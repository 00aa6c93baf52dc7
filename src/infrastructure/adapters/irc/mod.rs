//! IRC adapter

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::event::{JOIN, PRIVMSG};
use crate::domain::entities::Event;
use crate::domain::traits::ChatSession;

/// Welcome numeric sent once registration succeeds
const RPL_WELCOME: &str = "001";
/// Nickname already in use
const ERR_NICKNAMEINUSE: &str = "433";

/// One parsed protocol line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcLine {
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
}

impl IrcLine {
    /// Parse `[:prefix] COMMAND [params...] [:trailing]`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (prefix, rest) = match line.strip_prefix(':') {
            Some(stripped) => {
                let (prefix, rest) = stripped.split_once(' ')?;
                (Some(prefix.to_string()), rest)
            }
            None => (None, line),
        };

        let (head, trailing) = match rest.split_once(" :") {
            Some((head, trailing)) => (head, Some(trailing)),
            None => (rest, None),
        };

        let mut words = head.split_whitespace();
        let command = words.next()?.to_ascii_uppercase();
        let mut params: Vec<String> = words.map(str::to_string).collect();
        if let Some(trailing) = trailing {
            params.push(trailing.to_string());
        }

        Some(Self {
            prefix,
            command,
            params,
        })
    }

    /// Nick part of a `nick!user@host` prefix
    pub fn nick(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|p| p.split_once('!').map(|(nick, _)| nick).unwrap_or(p))
    }

    pub fn param(&self, idx: usize) -> Option<&str> {
        self.params.get(idx).map(String::as_str)
    }
}

/// Strip line breaks so text cannot smuggle extra protocol lines
fn sanitize(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// IRC session over a plain TCP connection
pub struct IrcSession {
    nick: String,
    channel: String,
    reader: Mutex<Lines<BufReader<OwnedReadHalf>>>,
    writer: Mutex<OwnedWriteHalf>,
}

impl IrcSession {
    /// Connect, register `nick` and join `channel`
    pub async fn connect(
        host: &str,
        port: u16,
        nick: impl Into<String>,
        channel: impl Into<String>,
    ) -> Result<Self, BotError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|e| BotError::Network(format!("Failed to connect to {}:{}: {}", host, port, e)))?;
        tracing::info!("Connected to {}:{}", host, port);

        let (read_half, write_half) = stream.into_split();
        let session = Self {
            nick: nick.into(),
            channel: channel.into(),
            reader: Mutex::new(BufReader::new(read_half).lines()),
            writer: Mutex::new(write_half),
        };

        session.send_raw(&format!("NICK {}", session.nick)).await?;
        session
            .send_raw(&format!("USER {} 0 * :{}", session.nick, session.nick))
            .await?;
        session.wait_for_welcome().await?;

        session.send_raw(&format!("JOIN {}", session.channel)).await?;
        tracing::info!("Joined {} as {}", session.channel, session.nick);
        Ok(session)
    }

    async fn send_raw(&self, line: &str) -> Result<(), BotError> {
        tracing::trace!(">> {}", line);
        let mut writer = self.writer.lock().await;
        writer.write_all(format!("{}\r\n", line).as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    async fn read_line(&self) -> Result<Option<IrcLine>, BotError> {
        let mut reader = self.reader.lock().await;
        loop {
            let Some(raw) = reader.next_line().await? else {
                return Ok(None);
            };
            tracing::trace!("<< {}", raw);
            match IrcLine::parse(&raw) {
                Some(line) => return Ok(Some(line)),
                None => tracing::debug!("Ignoring unparsable line: {:?}", raw),
            }
        }
    }

    /// Answer keep-alives. Returns true if the line was a PING.
    async fn handle_ping(&self, line: &IrcLine) -> Result<bool, BotError> {
        if line.command != "PING" {
            return Ok(false);
        }
        let token = line.param(0).unwrap_or_default();
        self.send_raw(&format!("PONG :{}", token)).await?;
        Ok(true)
    }

    async fn wait_for_welcome(&self) -> Result<(), BotError> {
        while let Some(line) = self.read_line().await? {
            if self.handle_ping(&line).await? {
                continue;
            }
            match line.command.as_str() {
                RPL_WELCOME => return Ok(()),
                ERR_NICKNAMEINUSE => {
                    return Err(BotError::Protocol(format!("Nick {} is already in use", self.nick)))
                }
                "ERROR" => {
                    return Err(BotError::Protocol(line.param(0).unwrap_or("ERROR").to_string()))
                }
                _ => {}
            }
        }
        Err(BotError::Network("Connection closed during registration".to_string()))
    }

    /// Normalize a protocol line into an event, if it is one we route
    fn to_event(&self, line: &IrcLine) -> Option<Event> {
        let sender = line.nick()?;
        match line.command.as_str() {
            PRIVMSG => Some(Event::privmsg(sender, line.param(0)?, line.param(1).unwrap_or_default())),
            // The server echoes our own join back
            JOIN if sender != self.nick => Some(Event::join(sender, line.param(0)?)),
            _ => None,
        }
    }
}

#[async_trait]
impl ChatSession for IrcSession {
    fn nick(&self) -> &str {
        &self.nick
    }

    fn channel(&self) -> &str {
        &self.channel
    }

    async fn send_message(&self, text: &str, target: Option<&str>) -> Result<(), BotError> {
        let target = target.unwrap_or(&self.channel);
        self.send_raw(&format!("PRIVMSG {} :{}", target, sanitize(text))).await
    }

    async fn send_action(&self, text: &str) -> Result<(), BotError> {
        self.send_raw(&format!("PRIVMSG {} :\x01ACTION {}\x01", self.channel, sanitize(text)))
            .await
    }

    async fn leave_channel(&self) -> Result<(), BotError> {
        self.send_raw(&format!("PART {}", self.channel)).await
    }

    async fn close(&self) -> Result<(), BotError> {
        self.send_raw("QUIT :Bye").await?;
        self.writer.lock().await.shutdown().await?;
        Ok(())
    }

    async fn next_event(&self) -> Result<Option<Event>, BotError> {
        while let Some(line) = self.read_line().await? {
            if self.handle_ping(&line).await? {
                continue;
            }
            if let Some(event) = self.to_event(&line) {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_privmsg() {
        let line = IrcLine::parse(":alice!a@host PRIVMSG #bots :HelperBot! eat rock\r\n").unwrap();
        assert_eq!(line.nick(), Some("alice"));
        assert_eq!(line.command, "PRIVMSG");
        assert_eq!(line.params, vec!["#bots", "HelperBot! eat rock"]);
    }

    #[test]
    fn test_parse_ping_without_prefix() {
        let line = IrcLine::parse("PING :irc.example.net").unwrap();
        assert_eq!(line.prefix, None);
        assert_eq!(line.command, "PING");
        assert_eq!(line.param(0), Some("irc.example.net"));
    }

    #[test]
    fn test_parse_numeric_and_join() {
        let welcome = IrcLine::parse(":server 001 HelperBot :Welcome").unwrap();
        assert_eq!(welcome.command, "001");
        assert_eq!(welcome.params, vec!["HelperBot", "Welcome"]);

        let join = IrcLine::parse(":bob!b@host JOIN #bots").unwrap();
        assert_eq!(join.nick(), Some("bob"));
        assert_eq!(join.param(0), Some("#bots"));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(IrcLine::parse(""), None);
        assert_eq!(IrcLine::parse(":prefixonly"), None);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("one\r\nQUIT"), "one  QUIT");
    }
}
