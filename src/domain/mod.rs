//! Domain layer - Core bot logic with no I/O
//! 
//! This layer contains:
//! - Entities: Core objects (Event, Flag, TriggerRule, StomachState, Handler)
//! - Traits: Abstractions for infrastructure (ChatSession, Store, TitleFetcher)
//! - Catalogue: Static phrase tables used by the toy commands and greetings

pub mod catalogue;
pub mod entities;
pub mod traits;
