use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::application::messaging::Context;

/// Which inbound messages a handler sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Messages addressed to the bot's channel
    Channel,
    /// Messages addressed to the bot's own nick
    Private,
}

/// Marker returned by a handler that has dealt with an event.
///
/// Once a handler claims, no later handler in the same list is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub handler: &'static str,
}

impl Claim {
    pub fn by(handler: &'static str) -> Self {
        Self { handler }
    }
}

/// Handler result
pub type HandlerResult = Result<Option<Claim>, BotError>;

/// A programmatic command handler
#[async_trait]
pub trait Handler: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Inspect the event, perform any side effects, and claim it or pass
    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult;
}

/// Ordered handler lists. Registration order is evaluation priority.
#[derive(Default)]
pub struct CommandRegistry {
    channel: Vec<Box<dyn Handler>>,
    private: Vec<Box<dyn Handler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the end of the list for `scope`
    pub fn register<H: Handler + 'static>(&mut self, scope: Scope, handler: H) {
        tracing::debug!("Registering {:?} handler: {}", scope, handler.name());
        self.list_mut(scope).push(Box::new(handler));
    }

    pub fn handlers(&self, scope: Scope) -> &[Box<dyn Handler>] {
        match scope {
            Scope::Channel => &self.channel,
            Scope::Private => &self.private,
        }
    }

    fn list_mut(&mut self, scope: Scope) -> &mut Vec<Box<dyn Handler>> {
        match scope {
            Scope::Channel => &mut self.channel,
            Scope::Private => &mut self.private,
        }
    }

    pub fn names(&self, scope: Scope) -> Vec<&'static str> {
        self.handlers(scope).iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.channel.len() + self.private.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
