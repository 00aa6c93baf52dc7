//! The attack/eat/spit/vomit toy commands

use async_trait::async_trait;

use crate::application::messaging::Context;
use crate::domain::catalogue::{self, ATTACKS};
use crate::domain::entities::{Claim, Handler, HandlerResult};

const EMPTY_STOMACH: &str = "hasn't eaten anything yet!";

pub struct Attack;

#[async_trait]
impl Handler for Attack {
    fn name(&self) -> &'static str {
        "attack"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(cmd) = ctx.command().filter(|c| c.is("attack")) else {
            return Ok(None);
        };
        if cmd.has_args() {
            ctx.act(&catalogue::pick(ATTACKS, cmd.args)).await?;
        }
        Ok(Some(Claim::by(self.name())))
    }
}

pub struct Eat;

#[async_trait]
impl Handler for Eat {
    fn name(&self) -> &'static str {
        "eat"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(cmd) = ctx.command().filter(|c| c.is("eat")) else {
            return Ok(None);
        };
        if cmd.has_args() {
            ctx.stomach.eat(cmd.args);
            ctx.act(&format!("eats {}!", cmd.args)).await?;
        }
        Ok(Some(Claim::by(self.name())))
    }
}

/// Only claims when the victim was actually in the stomach
pub struct Spit;

#[async_trait]
impl Handler for Spit {
    fn name(&self) -> &'static str {
        "spit"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(cmd) = ctx.command().filter(|c| c.is("spit") && c.has_args()) else {
            return Ok(None);
        };
        if !ctx.stomach.spit(cmd.args) {
            return Ok(None);
        }
        ctx.act(&format!("spits out {}!", cmd.args)).await?;
        Ok(Some(Claim::by(self.name())))
    }
}

pub struct ShowStomach;

#[async_trait]
impl Handler for ShowStomach {
    fn name(&self) -> &'static str {
        "show_stomach"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if ctx.command().filter(|c| c.is("stomach")).is_none() {
            return Ok(None);
        }
        if ctx.stomach.is_empty() {
            ctx.act(EMPTY_STOMACH).await?;
        } else {
            let text = format!("has eaten {}", ctx.stomach.contents().join(", "));
            ctx.act(&text).await?;
        }
        Ok(Some(Claim::by(self.name())))
    }
}

pub struct Vomit;

#[async_trait]
impl Handler for Vomit {
    fn name(&self) -> &'static str {
        "vomit"
    }

    async fn evaluate(&self, ctx: &mut Context<'_>) -> HandlerResult {
        if ctx.command().filter(|c| c.is("vomit")).is_none() {
            return Ok(None);
        }
        let contents = ctx.stomach.vomit();
        if contents.is_empty() {
            ctx.act(EMPTY_STOMACH).await?;
        } else {
            ctx.act(&format!("vomits up {}!", contents.join(", "))).await?;
        }
        Ok(Some(Claim::by(self.name())))
    }
}
