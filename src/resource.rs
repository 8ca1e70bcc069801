use std::fmt;

use prost_types::Struct;

use crate::proto::ComponentConfig;
use crate::Result;

/// Model triple (`namespace:family:name`) a resource is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Model {
    pub namespace: &'static str,
    pub family: &'static str,
    pub name: &'static str,
}

impl Model {
    /// Builds a model triple from its three parts.
    pub const fn new(namespace: &'static str, family: &'static str, name: &'static str) -> Self {
        Self {
            namespace,
            family,
            name,
        }
    }

    /// Returns true if `triple` names this model.
    pub fn matches(&self, triple: &str) -> bool {
        let mut parts = triple.split(':');
        parts.next() == Some(self.namespace)
            && parts.next() == Some(self.family)
            && parts.next() == Some(self.name)
            && parts.next().is_none()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.family, self.name)
    }
}

/// Host-agnostic view of a resource configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceConfig {
    /// Name the host addresses the resource by.
    pub name: String,
    /// API triple, e.g. `rdk:component:camera`.
    pub api: String,
    /// Model triple, e.g. `hipsterbrown:camera:homeassistant`.
    pub model: String,
    /// Free-form attributes supplied by the user.
    pub attributes: Struct,
}

impl From<ComponentConfig> for ResourceConfig {
    fn from(config: ComponentConfig) -> Self {
        Self {
            name: config.name,
            api: config.api,
            model: config.model,
            attributes: config.attributes.unwrap_or_default(),
        }
    }
}

/// Lifecycle contract every resource served by this module implements.
///
/// The host validates a configuration, constructs the resource from it, and
/// later delivers new configurations through [`Resource::reconfigure`].
/// [`Resource::close`] is called when the host removes the resource or the
/// module shuts down.
#[tonic::async_trait]
pub trait Resource: Send + Sync + Sized + 'static {
    /// Model triple this resource is registered under.
    const MODEL: Model;

    /// Checks a configuration without side effects and returns the names of
    /// resources it depends on.
    fn validate(config: &ResourceConfig) -> Result<Vec<String>>;

    /// Constructs a configured resource.
    async fn new(config: &ResourceConfig, dependencies: &[String]) -> Result<Self>;

    /// Applies a new configuration in place.
    async fn reconfigure(&self, config: &ResourceConfig, dependencies: &[String]) -> Result<()>;

    /// Releases any resources held. Called at most once per instance by the module.
    async fn close(&self) {}
}
