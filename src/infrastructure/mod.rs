//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite persistence for flags and triggers
//! - Adapters: Chat network sessions (IRC, console)
//! - Webcrawler: Page title fetching

pub mod adapters;
pub mod config;
pub mod database;
pub mod webcrawler;
