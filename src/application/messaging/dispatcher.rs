//! Event dispatcher - Routes events to handlers, then to learned triggers

use crate::application::errors::BotError;
use crate::domain::catalogue::{self, GREETINGS};
use crate::domain::entities::{CommandRegistry, Event, Flag, Scope, StomachState};
use crate::domain::traits::{ChatSession, Store};

use super::context::Context;

/// Routes each inbound event.
///
/// Messages go through the handler list for their scope and then, whatever
/// the handlers did, through the learned triggers. A single message can
/// therefore get two responses.
pub struct Dispatcher {
    registry: CommandRegistry,
    store: Box<dyn Store>,
    stomach: StomachState,
    shutdown_requested: bool,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, store: Box<dyn Store>) -> Self {
        Self {
            registry,
            store,
            stomach: StomachState::new(),
            shutdown_requested: false,
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn stomach(&self) -> &StomachState {
        &self.stomach
    }

    /// Set once a handler has asked the bot to terminate
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Entry point for every event read from the session
    pub async fn dispatch(&mut self, session: &dyn ChatSession, event: &Event) -> Result<(), BotError> {
        if event.is_join() {
            self.on_join(session, event).await
        } else if event.has_message() {
            self.on_message(session, event).await
        } else {
            Ok(())
        }
    }

    pub async fn on_message(&mut self, session: &dyn ChatSession, event: &Event) -> Result<(), BotError> {
        let scope = if event.recipient == session.channel() {
            Some(Scope::Channel)
        } else if event.recipient == session.nick() {
            Some(Scope::Private)
        } else {
            None
        };

        if let Some(scope) = scope {
            tracing::debug!("[{:?}] {}", scope, event);
            let mut ctx = Context::new(
                event,
                session,
                self.store.as_ref(),
                &mut self.stomach,
                &mut self.shutdown_requested,
            );

            for handler in self.registry.handlers(scope) {
                match handler.evaluate(&mut ctx).await {
                    Ok(Some(claim)) => {
                        tracing::debug!("Claimed by {}", claim.handler);
                        break;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Handler {} failed: {}", handler.name(), e);
                    }
                }
            }
        }

        // Learned triggers run whether or not a handler claimed the message
        if let Some(response) = self.store.match_message(&event.message, &event.sender)? {
            session.send_message(&response, None).await?;
        }

        Ok(())
    }

    pub async fn on_join(&mut self, session: &dyn ChatSession, event: &Event) -> Result<(), BotError> {
        if self.store.has_flag(&event.sender, Flag::Ignore)? {
            tracing::debug!("Not greeting ignored user {}", event.sender);
            return Ok(());
        }

        let greeting = catalogue::pick(GREETINGS, &event.sender);
        session.send_action(&greeting).await
    }
}
