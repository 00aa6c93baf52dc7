//! Private-message administration commands

use std::time::Duration;

use async_trait::async_trait;

use crate::application::messaging::Context;
use crate::domain::entities::{Flag, Handler, HandlerResult};

/// `purge_commands`: forget every learned trigger. Admin only.
pub struct ClearCommands;

#[async_trait]
impl Handler for ClearCommands {
    fn name(&self) -> &'static str {
        "clear_commands"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if ctx.message() != "purge_commands" {
            return Ok(None);
        }
        if !ctx.store.has_flag(ctx.sender(), Flag::Admin)? {
            tracing::warn!("{} tried to purge commands without admin", ctx.sender());
            return Ok(None);
        }

        let removed = ctx.store.purge()?;
        tracing::info!("{} purged {} trigger(s)", ctx.sender(), removed);
        ctx.reply_private(&format!("Purged {} commands.", removed)).await?;
        Ok(None)
    }
}

/// `append_whitelist <user> [user...]`.
///
/// Any sender may grant the whitelist flag, including to themselves.
pub struct Whitelist;

#[async_trait]
impl Handler for Whitelist {
    fn name(&self) -> &'static str {
        "whitelist"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(rest) = ctx.message().strip_prefix("append_whitelist") else {
            return Ok(None);
        };

        let users: Vec<&str> = rest.split_whitespace().collect();
        for user in &users {
            ctx.store.add_flag(user, Flag::Whitelist)?;
        }
        if !users.is_empty() {
            tracing::info!("{} whitelisted {}", ctx.sender(), users.join(", "));
            ctx.reply_private(&format!("Whitelisted {}.", users.join(", "))).await?;
        }
        Ok(None)
    }
}

/// `terminate`: shut the bot down. Admin only.
pub struct Terminate;

#[async_trait]
impl Handler for Terminate {
    fn name(&self) -> &'static str {
        "terminate"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if ctx.message() != "terminate" {
            return Ok(None);
        }
        if ctx.store.has_flag(ctx.sender(), Flag::Admin)? {
            tracing::info!("Termination requested by {}", ctx.sender());
            ctx.request_shutdown();
        } else {
            tracing::warn!("{} tried to terminate without admin", ctx.sender());
        }
        Ok(None)
    }
}

/// `list_commands`: dump every learned trigger to the requester, one
/// message per rule, with `delay` between messages.
pub struct ListCommands {
    delay: Duration,
}

impl ListCommands {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Handler for ListCommands {
    fn name(&self) -> &'static str {
        "list_commands"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if ctx.message() != "list_commands" {
            return Ok(None);
        }

        let rules = ctx.store.list_all()?;
        tracing::debug!("Listing {} trigger(s) to {}", rules.len(), ctx.sender());
        for (i, rule) in rules.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.delay).await;
            }
            ctx.reply_private(&format!("{} -> {}", rule.pattern, rule.response)).await?;
        }
        Ok(None)
    }
}
