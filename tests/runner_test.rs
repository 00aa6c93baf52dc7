//! Event loop, shutdown and persistence tests
//! Run with: cargo test --test runner_test

mod common;

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use common::*;
use irc_helper::application::messaging::{Context, Dispatcher};
use irc_helper::application::services::{BotRunner, CommandService};
use irc_helper::domain::entities::{
    CommandRegistry, Flag, Handler, HandlerResult, Scope, TriggerRule,
};
use tokio::sync::oneshot;
use irc_helper::domain::traits::{FlagStore, Store, TriggerStore};
use irc_helper::infrastructure::database::Database;

#[tokio::test]
async fn test_terminate_stops_loop_and_shuts_down_once() {
    let dispatcher = dispatcher();
    dispatcher.store().add_flag("root", Flag::Admin).unwrap();
    dispatcher.store().learn("^hi", "hello").unwrap();

    let session = RecordingSession::with_script(vec![
        channel_msg("alice", "hi"),
        private_msg("root", "terminate"),
        channel_msg("alice", "hi again"),
    ]);
    let observer = session.clone();

    BotRunner::new(session, dispatcher).run().await.unwrap();

    assert_eq!(
        observer.sent(),
        vec![Outbound::to_channel("hello"), Outbound::Leave, Outbound::Close]
    );
    assert_eq!(observer.remaining_script(), 1);
}

#[tokio::test]
async fn test_end_of_stream_shuts_down() {
    let session = RecordingSession::with_script(vec![channel_msg("alice", "HelperBot! stomach")]);
    let observer = session.clone();

    BotRunner::new(session, dispatcher()).run().await.unwrap();

    assert_eq!(
        observer.sent(),
        vec![
            Outbound::action("hasn't eaten anything yet!"),
            Outbound::Leave,
            Outbound::Close,
        ]
    );
}

#[tokio::test]
async fn test_process_handles_single_event() {
    let session = RecordingSession::new();
    let observer = session.clone();
    let mut runner = BotRunner::new(session, dispatcher());

    runner.process(&channel_msg("alice", "HelperBot! eat rock")).await;

    assert_eq!(runner.dispatcher().stomach().contents(), ["rock"]);
    assert_eq!(observer.sent(), vec![Outbound::action("eats rock!")]);
}

#[test]
fn test_rules_and_flags_survive_restart() {
    ensure_init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bot.db");

    let db = Database::new(&path).unwrap();
    db.learn("^one", "1").unwrap();
    db.learn("^two", "2").unwrap();
    db.add_flag_named("bob", "whitelist").unwrap();
    db.close().unwrap();

    let db = Database::new(&path).unwrap();
    assert_eq!(
        db.list_all().unwrap(),
        vec![TriggerRule::new("^one", "1"), TriggerRule::new("^two", "2")]
    );
    assert_eq!(db.get_flags("bob").unwrap().codes(), vec!['w']);
}

#[test]
fn test_broken_store_path_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("bot.db");
    assert!(Database::new(&path).is_err());
}

#[tokio::test]
async fn test_stomach_is_not_persisted() {
    ensure_init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bot.db");

    let build = || {
        let mut commands = CommandService::new();
        commands.register_defaults(
            std::sync::Arc::new(StubFetcher::new(Ok(None))),
            Duration::ZERO,
        );
        Dispatcher::new(commands.into_registry(), Box::new(Database::new(&path).unwrap()))
    };

    let session = RecordingSession::with_script(vec![channel_msg("alice", "HelperBot! eat rock")]);
    BotRunner::new(session, build()).run().await.unwrap();

    let session = RecordingSession::with_script(vec![channel_msg("alice", "HelperBot! stomach")]);
    let observer = session.clone();
    BotRunner::new(session, build()).run().await.unwrap();

    assert_eq!(observer.sent()[0], Outbound::action("hasn't eaten anything yet!"));
}

/// Handler that signals once it starts and then never finishes
struct Stall {
    started: Mutex<Option<oneshot::Sender<()>>>,
}

#[async_trait]
impl Handler for Stall {
    fn name(&self) -> &'static str {
        "stall"
    }

    async fn evaluate(&self, _ctx: &mut Context<'_>) -> HandlerResult {
        if let Some(started) = self.started.lock().unwrap().take() {
            let _ = started.send(());
        }
        std::future::pending::<()>().await;
        Ok(None)
    }
}

#[tokio::test]
async fn test_interrupt_while_handling_still_shuts_down() {
    ensure_init();
    let (tx, rx) = oneshot::channel();
    let mut registry = CommandRegistry::new();
    registry.register(
        Scope::Channel,
        Stall {
            started: Mutex::new(Some(tx)),
        },
    );
    let dispatcher = Dispatcher::new(registry, Box::new(Database::in_memory().unwrap()));

    let session = RecordingSession::with_script(vec![
        channel_msg("alice", "anything"),
        channel_msg("alice", "never read"),
    ]);
    let observer = session.clone();

    let interrupt = async {
        let _ = rx.await;
    };
    tokio::time::timeout(
        Duration::from_secs(5),
        BotRunner::new(session, dispatcher).run_until(interrupt),
    )
    .await
    .expect("runner should stop once interrupted")
    .unwrap();

    assert_eq!(observer.sent(), vec![Outbound::Leave, Outbound::Close]);
    assert_eq!(observer.remaining_script(), 1);
}
