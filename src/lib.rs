//! irc-helper - an IRC bot that learns stimulus/response triggers
//!
//! Layered as domain (entities and traits), application (dispatch and
//! handlers) and infrastructure (SQLite, network sessions, config).

pub mod application;
pub mod domain;
pub mod infrastructure;
