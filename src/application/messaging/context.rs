//! Per-event state handed to every handler

use crate::application::errors::BotError;
use crate::domain::entities::{Event, StomachState};
use crate::domain::traits::{ChatSession, Store};

use super::parser::BangCommand;

/// Everything a handler may read or change while evaluating one event
pub struct Context<'a> {
    pub event: &'a Event,
    pub session: &'a dyn ChatSession,
    pub store: &'a dyn Store,
    pub stomach: &'a mut StomachState,
    shutdown: &'a mut bool,
}

impl<'a> Context<'a> {
    pub fn new(
        event: &'a Event,
        session: &'a dyn ChatSession,
        store: &'a dyn Store,
        stomach: &'a mut StomachState,
        shutdown: &'a mut bool,
    ) -> Self {
        Self {
            event,
            session,
            store,
            stomach,
            shutdown,
        }
    }

    pub fn sender(&self) -> &'a str {
        &self.event.sender
    }

    pub fn message(&self) -> &'a str {
        &self.event.message
    }

    /// `"<nick>! <verb> ..."` addressed to this bot, if the message is one
    pub fn command(&self) -> Option<BangCommand<'a>> {
        BangCommand::parse(self.session.nick(), &self.event.message)
    }

    /// Ask the runner to shut down once this event is finished
    pub fn request_shutdown(&mut self) {
        *self.shutdown = true;
    }

    /// Chat line to the channel
    pub async fn say(&self, text: &str) -> Result<(), BotError> {
        self.session.send_message(text, None).await
    }

    /// Chat line back to whoever sent the event
    pub async fn reply_private(&self, text: &str) -> Result<(), BotError> {
        self.session.send_message(text, Some(&self.event.sender)).await
    }

    pub async fn act(&self, text: &str) -> Result<(), BotError> {
        self.session.send_action(text).await
    }
}
