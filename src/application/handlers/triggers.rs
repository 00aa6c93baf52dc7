//! Teaching and forgetting learned triggers

use async_trait::async_trait;

use crate::application::messaging::Context;
use crate::domain::entities::{Claim, Flag, Handler, HandlerResult, TriggerRule};

/// `<nick>! learn <pattern> -> <response>`, whitelisted users only
pub struct LearnTrigger;

#[async_trait]
impl Handler for LearnTrigger {
    fn name(&self) -> &'static str {
        "learn_trigger"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(cmd) = ctx.command().filter(|c| c.is("learn")) else {
            return Ok(None);
        };
        let claim = Some(Claim::by(self.name()));

        let Some((pattern, response)) = cmd.args.split_once("->") else {
            return Ok(claim);
        };
        if !ctx.store.has_flag(ctx.sender(), Flag::Whitelist)? {
            tracing::debug!("{} is not whitelisted, ignoring learn", ctx.sender());
            return Ok(claim);
        }

        let (pattern, response) = (pattern.trim(), response.trim());
        if pattern.is_empty() || response.is_empty() {
            return Ok(claim);
        }
        if let Err(e) = TriggerRule::compile(pattern) {
            tracing::warn!("Refusing to learn invalid pattern {:?}: {}", pattern, e);
            return Ok(claim);
        }

        if ctx.store.learn(pattern, response)? {
            tracing::info!("{} taught {:?} -> {:?}", ctx.sender(), pattern, response);
            ctx.act(&format!("has been trained by {}!", ctx.sender())).await?;
        } else {
            ctx.act("already knows that!").await?;
        }
        Ok(claim)
    }
}

/// `<nick>! forget <pattern>`
pub struct ForgetTrigger;

#[async_trait]
impl Handler for ForgetTrigger {
    fn name(&self) -> &'static str {
        "forget_trigger"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(cmd) = ctx.command().filter(|c| c.is("forget")) else {
            return Ok(None);
        };
        let claim = Some(Claim::by(self.name()));
        if !cmd.has_args() {
            return Ok(claim);
        }

        let trigger = cmd.args;
        match ctx.store.response_for(trigger)? {
            Some(response) => {
                let removed = ctx.store.forget(trigger)?;
                tracing::info!("{} removed {} rule(s) for {:?}", ctx.sender(), removed, trigger);
                ctx.act(&format!("forgot {} -> {}", trigger, response)).await?;
            }
            None => ctx.act("doesn't know that!").await?,
        }
        Ok(claim)
    }
}
