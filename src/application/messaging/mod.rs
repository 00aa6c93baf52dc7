//! Message handling - Routing inbound events to handlers and triggers

pub mod context;
pub mod dispatcher;
pub mod parser;

pub use context::Context;
pub use dispatcher::Dispatcher;
pub use parser::BangCommand;
