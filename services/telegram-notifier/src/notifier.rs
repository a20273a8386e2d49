//! Notifier trait and the registry of available notifier types

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::NotificationModel;
use crate::context::{default_should_notify, EvalContext};
use crate::error::NotifierError;
use crate::io::WebhookSender;
use crate::telegram::TelegramNotifier;

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Name given to this notifier instance in the configuration
    fn name(&self) -> &str;

    /// Whether this evaluation warrants a notification at all
    fn should_notify(&self, context: &EvalContext) -> bool {
        default_should_notify(context)
    }

    /// Build and dispatch a notification for `context`
    async fn notify(&self, context: &EvalContext) -> crate::Result<()>;
}

/// Constructs a notifier from its persisted definition
pub type NotifierFactory =
    fn(&NotificationModel, Arc<dyn WebhookSender>) -> crate::Result<Arc<dyn Notifier>>;

/// A notifier type that can be instantiated from configuration
#[derive(Clone)]
pub struct NotifierPlugin {
    pub type_name: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub factory: NotifierFactory,
}

impl std::fmt::Debug for NotifierPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierPlugin")
            .field("type_name", &self.type_name)
            .field("name", &self.name)
            .finish()
    }
}

/// Notifier types known to the process, keyed by type name.
///
/// Built explicitly at startup and passed to whoever creates notifiers.
#[derive(Debug, Default)]
pub struct NotifierRegistry {
    plugins: HashMap<&'static str, NotifierPlugin>,
}

impl NotifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in notifier type
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TelegramNotifier::plugin());
        registry
    }

    /// Add a plugin, replacing any previous plugin with the same type name
    pub fn register(&mut self, plugin: NotifierPlugin) {
        tracing::debug!("Registering notifier type '{}'", plugin.type_name);
        self.plugins.insert(plugin.type_name, plugin);
    }

    pub fn get(&self, type_name: &str) -> Option<&NotifierPlugin> {
        self.plugins.get(type_name)
    }

    /// All registered plugins, sorted by type name
    pub fn plugins(&self) -> Vec<&NotifierPlugin> {
        let mut plugins: Vec<_> = self.plugins.values().collect();
        plugins.sort_by_key(|p| p.type_name);
        plugins
    }

    /// Instantiate the notifier described by `model`
    pub fn create(
        &self,
        model: &NotificationModel,
        sender: Arc<dyn WebhookSender>,
    ) -> crate::Result<Arc<dyn Notifier>> {
        let plugin = self.get(&model.notifier_type).ok_or_else(|| {
            NotifierError::Config(format!(
                "Unsupported notification type: {}",
                model.notifier_type
            ))
        })?;
        (plugin.factory)(model, sender)
    }
}
