use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::{
    Attack, ClearCommands, Eat, ForgetTrigger, LearnTrigger, ListCommands, ShowStomach, Spit,
    Terminate, UrlTitle, Vomit, Whitelist,
};
use crate::domain::entities::{CommandRegistry, Handler, Scope};
use crate::domain::traits::TitleFetcher;

/// Builds the ordered handler lists the dispatcher evaluates
#[derive(Default)]
pub struct CommandService {
    registry: CommandRegistry,
}

impl CommandService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: Handler + 'static>(&mut self, scope: Scope, handler: H) -> &mut Self {
        self.registry.register(scope, handler);
        self
    }

    /// Register the builtin handlers in priority order
    pub fn register_defaults(&mut self, fetcher: Arc<dyn TitleFetcher>, list_delay: Duration) -> &mut Self {
        self.register(Scope::Channel, LearnTrigger)
            .register(Scope::Channel, ForgetTrigger)
            .register(Scope::Channel, Attack)
            .register(Scope::Channel, Eat)
            .register(Scope::Channel, Spit)
            .register(Scope::Channel, ShowStomach)
            .register(Scope::Channel, Vomit)
            .register(Scope::Channel, UrlTitle::new(fetcher));

        self.register(Scope::Private, ClearCommands)
            .register(Scope::Private, Whitelist)
            .register(Scope::Private, Terminate)
            .register(Scope::Private, ListCommands::new(list_delay))
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> CommandRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::FetchError;
    use async_trait::async_trait;

    struct NoFetch;

    #[async_trait]
    impl TitleFetcher for NoFetch {
        async fn fetch_title(&self, _url: &str) -> Result<Option<String>, FetchError> {
            Ok(None)
        }
    }

    #[test]
    fn test_default_priority_order() {
        let mut service = CommandService::new();
        service.register_defaults(Arc::new(NoFetch), Duration::ZERO);

        let registry = service.registry();
        assert_eq!(
            registry.names(Scope::Channel),
            vec!["learn_trigger", "forget_trigger", "attack", "eat", "spit", "show_stomach", "vomit", "url_title"]
        );
        assert_eq!(
            registry.names(Scope::Private),
            vec!["clear_commands", "whitelist", "terminate", "list_commands"]
        );
        assert_eq!(registry.len(), 12);
    }
}
