//! Application layer - Dispatch and command handling
//! 
//! This layer contains:
//! - Handlers: The builtin channel and private commands
//! - Services: Handler registration and the event loop
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing, handler context, dispatching

pub mod errors;
pub mod handlers;
pub mod messaging;
pub mod services;
