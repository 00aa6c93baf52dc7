//! Application services - Wiring and the event loop

pub mod command_service;
pub mod message_service;

pub use command_service::CommandService;
pub use message_service::BotRunner;
