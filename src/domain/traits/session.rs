use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::Event;

/// Connection to the chat network
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// The bot's current nick
    fn nick(&self) -> &str;

    /// The channel the bot sits in
    fn channel(&self) -> &str;

    /// Send a chat line to `target`, or to the channel when `None`
    async fn send_message(&self, text: &str, target: Option<&str>) -> Result<(), BotError>;

    /// Send a third-person action line to the channel
    async fn send_action(&self, text: &str) -> Result<(), BotError>;

    async fn leave_channel(&self) -> Result<(), BotError>;

    async fn close(&self) -> Result<(), BotError>;

    /// Next normalized event, or `None` once the connection has ended
    async fn next_event(&self) -> Result<Option<Event>, BotError>;
}
