//! Builtin command handlers
//!
//! Channel handlers claim an event when they recognise it. Private handlers
//! never claim, so every one of them sees each private message.

pub mod admin;
pub mod stomach;
pub mod triggers;
pub mod url_title;

pub use admin::{ClearCommands, ListCommands, Terminate, Whitelist};
pub use stomach::{Attack, Eat, ShowStomach, Spit, Vomit};
pub use triggers::{ForgetTrigger, LearnTrigger};
pub use url_title::UrlTitle;
