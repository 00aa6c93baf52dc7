//! Chat network adapters

pub mod console;
pub mod irc;

pub use console::ConsoleSession;
pub use irc::IrcSession;
