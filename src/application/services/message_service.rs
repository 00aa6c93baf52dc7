use std::future::Future;

use crate::application::errors::BotError;
use crate::application::messaging::Dispatcher;
use crate::domain::entities::Event;
use crate::domain::traits::ChatSession;

/// Reads events from a session and feeds them to the dispatcher one at a
/// time. Each event is finished, including any page fetch or paced dump,
/// before the next one is read.
pub struct BotRunner<S: ChatSession> {
    session: S,
    dispatcher: Dispatcher,
}

impl<S: ChatSession> BotRunner<S> {
    pub fn new(session: S, dispatcher: Dispatcher) -> Self {
        Self { session, dispatcher }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatch one event. Failures are logged, never fatal.
    pub async fn process(&mut self, event: &Event) {
        if let Err(e) = self.dispatcher.dispatch(&self.session, event).await {
            tracing::warn!("Failed to handle {}: {}", event, e);
        }
    }

    /// Run until terminated, disconnected or interrupted by Ctrl-C, then shut down
    pub async fn run(self) -> Result<(), BotError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Ctrl-C handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Like [`run`](Self::run), with `interrupt` standing in for Ctrl-C.
    ///
    /// The interrupt is honoured while waiting for the next event and while
    /// an event is being handled, so a stalled page fetch or a long paced
    /// dump does not hold off shutdown.
    pub async fn run_until<F>(mut self, interrupt: F) -> Result<(), BotError>
    where
        F: Future<Output = ()>,
    {
        let result = self.event_loop(interrupt).await;
        self.shutdown().await;
        result
    }

    async fn event_loop<F>(&mut self, interrupt: F) -> Result<(), BotError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);
        tracing::info!("Listening as {} in {}", self.session.nick(), self.session.channel());
        loop {
            let next = tokio::select! {
                next = self.session.next_event() => next?,
                _ = &mut interrupt => {
                    tracing::info!("Interrupted");
                    return Ok(());
                }
            };

            let Some(event) = next else {
                tracing::info!("Connection closed by server");
                return Ok(());
            };

            tokio::select! {
                _ = self.process(&event) => {}
                _ = &mut interrupt => {
                    tracing::info!("Interrupted while handling {}", event);
                    return Ok(());
                }
            }
            if self.dispatcher.shutdown_requested() {
                return Ok(());
            }
        }
    }

    /// Leave the channel, close the connection, then close the store.
    ///
    /// Takes `self`, so it can only happen once. Every step runs even if an
    /// earlier one failed.
    pub async fn shutdown(self) {
        tracing::info!("Shutting down");
        if let Err(e) = self.session.leave_channel().await {
            tracing::warn!("Failed to leave channel: {}", e);
        }
        if let Err(e) = self.session.close().await {
            tracing::warn!("Failed to close connection: {}", e);
        }
        match self.dispatcher.store().close() {
            Ok(()) => tracing::info!("Store closed"),
            Err(e) => tracing::error!("Failed to close store: {}", e),
        }
    }
}
