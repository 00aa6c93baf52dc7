//! Domain entities - Core objects with no external dependencies

pub mod command;
pub mod event;
pub mod flag;
pub mod stomach;
pub mod trigger;

pub use command::{Claim, CommandRegistry, Handler, HandlerResult, Scope};
pub use event::Event;
pub use flag::{Flag, FlagSet};
pub use stomach::StomachState;
pub use trigger::TriggerRule;
