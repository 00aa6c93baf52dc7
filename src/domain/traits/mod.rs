//! Domain traits - Abstractions for infrastructure implementations

pub mod fetch;
pub mod session;
pub mod store;

pub use fetch::{FetchError, TitleFetcher};
pub use session::ChatSession;
pub use store::{FlagStore, Store, TriggerStore};
