//! Camera backed by the Home Assistant camera proxy.

use std::sync::Arc;
use std::time::Duration;

use prost_types::Struct;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::camera::{Camera, Image, Properties};
use crate::client::HomeAssistantClient;
use crate::config::CameraConfig;
use crate::constants::{DEFAULT_REQUEST_TIMEOUT, HOMEASSISTANT_MODEL, MIME_TYPE_JPEG};
use crate::resource::{Model, Resource, ResourceConfig};
use crate::{ModuleError, Result};

struct Configured {
    config: CameraConfig,
    client: Arc<HomeAssistantClient>,
}

/// A single Home Assistant camera entity exposed as a camera resource.
///
/// Starts unconfigured; [`Resource::new`] applies the first configuration
/// immediately. Each reconfigure builds a fresh session client, installs it,
/// and closes the one it replaced.
pub struct HomeAssistantCamera {
    name: String,
    state: RwLock<Option<Configured>>,
}

impl HomeAssistantCamera {
    /// Allocates a camera that rejects capability calls until reconfigured.
    pub fn unconfigured(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(None),
        }
    }

    /// Name the host registered this camera under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currently applied configuration, if any.
    pub async fn config(&self) -> Option<CameraConfig> {
        self.state.read().await.as_ref().map(|c| c.config.clone())
    }

    async fn client(&self) -> Result<(Arc<HomeAssistantClient>, String)> {
        let state = self.state.read().await;
        let configured = state
            .as_ref()
            .ok_or_else(|| ModuleError::NotConfigured(self.name.clone()))?;
        Ok((configured.client.clone(), configured.config.entity_id.clone()))
    }
}

#[tonic::async_trait]
impl Resource for HomeAssistantCamera {
    const MODEL: Model = HOMEASSISTANT_MODEL;

    fn validate(config: &ResourceConfig) -> Result<Vec<String>> {
        CameraConfig::from_attributes(&config.attributes)?;
        Ok(Vec::new())
    }

    async fn new(config: &ResourceConfig, dependencies: &[String]) -> Result<Self> {
        let camera = Self::unconfigured(&config.name);
        camera.reconfigure(config, dependencies).await?;
        Ok(camera)
    }

    async fn reconfigure(&self, config: &ResourceConfig, _dependencies: &[String]) -> Result<()> {
        let camera_config = CameraConfig::from_attributes(&config.attributes)?;
        let client = Arc::new(HomeAssistantClient::new(
            &camera_config.host_address,
            &camera_config.access_token,
        )?);

        info!(
            "Configured {} for {} on {}",
            self.name, camera_config.entity_id, camera_config.host_address
        );

        let previous = self.state.write().await.replace(Configured {
            config: camera_config,
            client,
        });

        if let Some(previous) = previous {
            previous.client.close();
        }

        Ok(())
    }

    async fn close(&self) {
        if let Some(configured) = self.state.write().await.take() {
            configured.client.close();
            info!("Closed Home Assistant camera {}", self.name);
        }
    }
}

#[tonic::async_trait]
impl Camera for HomeAssistantCamera {
    async fn get_image(
        &self,
        mime_type: &str,
        _extra: Option<&Struct>,
        timeout: Option<Duration>,
    ) -> Result<Image> {
        let (client, entity_id) = self.client().await?;

        if !mime_type.is_empty() && mime_type != MIME_TYPE_JPEG {
            debug!("Ignoring mime type hint {}, camera proxy serves JPEG", mime_type);
        }

        let timeout = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        match client.fetch_snapshot(&entity_id, timeout).await? {
            Some(data) => Ok(Image::new(MIME_TYPE_JPEG, data)),
            None => Err(ModuleError::EmptySnapshot(entity_id)),
        }
    }

    async fn get_properties(&self, _timeout: Option<Duration>) -> Result<Properties> {
        Ok(Properties::default())
    }
}
