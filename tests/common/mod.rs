//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use irc_helper::application::errors::BotError;
use irc_helper::application::messaging::Dispatcher;
use irc_helper::application::services::CommandService;
use irc_helper::domain::entities::Event;
use irc_helper::domain::traits::{ChatSession, FetchError, TitleFetcher};
use irc_helper::infrastructure::database::Database;

pub const NICK: &str = "HelperBot";
pub const CHANNEL: &str = "#bots";

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Something the bot sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Message { target: String, text: String },
    Action(String),
    Leave,
    Close,
}

impl Outbound {
    pub fn to_channel(text: &str) -> Self {
        Outbound::Message {
            target: CHANNEL.to_string(),
            text: text.to_string(),
        }
    }

    pub fn to_user(user: &str, text: &str) -> Self {
        Outbound::Message {
            target: user.to_string(),
            text: text.to_string(),
        }
    }

    pub fn action(text: &str) -> Self {
        Outbound::Action(text.to_string())
    }
}

/// Session that records everything sent and replays scripted events
#[derive(Clone, Default)]
pub struct RecordingSession {
    sent: Arc<Mutex<Vec<Outbound>>>,
    script: Arc<Mutex<VecDeque<Event>>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(events: Vec<Event>) -> Self {
        let session = Self::new();
        session.script.lock().unwrap().extend(events);
        session
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    /// Return and forget everything recorded so far
    pub fn take(&self) -> Vec<Outbound> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    pub fn remaining_script(&self) -> usize {
        self.script.lock().unwrap().len()
    }

    fn record(&self, out: Outbound) {
        self.sent.lock().unwrap().push(out);
    }
}

#[async_trait]
impl ChatSession for RecordingSession {
    fn nick(&self) -> &str {
        NICK
    }

    fn channel(&self) -> &str {
        CHANNEL
    }

    async fn send_message(&self, text: &str, target: Option<&str>) -> Result<(), BotError> {
        self.record(Outbound::Message {
            target: target.unwrap_or(CHANNEL).to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_action(&self, text: &str) -> Result<(), BotError> {
        self.record(Outbound::Action(text.to_string()));
        Ok(())
    }

    async fn leave_channel(&self) -> Result<(), BotError> {
        self.record(Outbound::Leave);
        Ok(())
    }

    async fn close(&self) -> Result<(), BotError> {
        self.record(Outbound::Close);
        Ok(())
    }

    async fn next_event(&self) -> Result<Option<Event>, BotError> {
        Ok(self.script.lock().unwrap().pop_front())
    }
}

/// Title fetcher with a canned answer
pub struct StubFetcher {
    answer: Result<Option<String>, FetchError>,
    pub requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(answer: Result<Option<String>, FetchError>) -> Self {
        Self {
            answer,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TitleFetcher for StubFetcher {
    async fn fetch_title(&self, url: &str) -> Result<Option<String>, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.answer.clone()
    }
}

/// Dispatcher with the builtin handlers over an in-memory store
pub fn dispatcher_with(fetcher: Arc<StubFetcher>) -> Dispatcher {
    dispatcher_paced(fetcher, Duration::ZERO)
}

/// Same as [`dispatcher_with`], pausing `list_delay` between dumped triggers
pub fn dispatcher_paced(fetcher: Arc<StubFetcher>, list_delay: Duration) -> Dispatcher {
    ensure_init();
    let mut commands = CommandService::new();
    commands.register_defaults(fetcher, list_delay);
    Dispatcher::new(
        commands.into_registry(),
        Box::new(Database::in_memory().expect("in-memory database")),
    )
}

pub fn dispatcher() -> Dispatcher {
    dispatcher_with(Arc::new(StubFetcher::new(Ok(None))))
}

pub fn channel_msg(sender: &str, text: &str) -> Event {
    Event::privmsg(sender, CHANNEL, text)
}

pub fn private_msg(sender: &str, text: &str) -> Event {
    Event::privmsg(sender, NICK, text)
}
