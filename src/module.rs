use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::RwLock;
use tonic::metadata::MetadataMap;
use tonic::{Request, Response, Status};
use tracing::{info, warn};

use crate::camera::{self, Camera};
use crate::constants::CAMERA_API;
use crate::proto::{
    self, camera_service_server::CameraService, module_service_server::ModuleService,
    AddResourceRequest, AddResourceResponse, ComponentConfig, GetImageRequest, GetImageResponse,
    GetImagesRequest, GetImagesResponse, GetPointCloudRequest, GetPointCloudResponse,
    GetPropertiesRequest, GetPropertiesResponse, HandlerDefinition, ReadyRequest, ReadyResponse,
    ReconfigureResourceRequest, ReconfigureResourceResponse, RemoveResourceRequest,
    RemoveResourceResponse, ValidateConfigRequest, ValidateConfigResponse,
};
use crate::resource::{Resource, ResourceConfig};
use crate::ModuleError;

/// Serves every instance of one camera model to the host runtime.
///
/// Implements both generated services: lifecycle calls create, reconfigure and
/// remove named instances, and camera calls are routed to the instance named
/// in the request.
pub struct CameraModule<R> {
    resources: RwLock<HashMap<String, Arc<R>>>,
}

impl<R: Resource + Camera> Default for CameraModule<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource + Camera> CameraModule<R> {
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
        }
    }

    /// Names of the registered instances.
    pub async fn resource_names(&self) -> Vec<String> {
        self.resources.read().await.keys().cloned().collect()
    }

    /// Looks up a registered instance by name.
    pub async fn resource(&self, name: &str) -> crate::Result<Arc<R>> {
        self.resources
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| ModuleError::NotFound(name.to_string()))
    }

    /// Closes and unregisters every instance.
    pub async fn close_all(&self) {
        let resources: Vec<_> = self.resources.write().await.drain().collect();
        for (name, resource) in resources {
            info!("Closing resource {}", name);
            resource.close().await;
        }
    }

    fn resource_config(config: Option<ComponentConfig>) -> crate::Result<ResourceConfig> {
        let config: ResourceConfig = config
            .ok_or_else(|| ModuleError::Configuration("Missing resource config".to_string()))?
            .into();

        if !R::MODEL.matches(&config.model) {
            return Err(ModuleError::Configuration(format!(
                "Unsupported model {} (this module serves {})",
                config.model,
                R::MODEL
            )));
        }
        if !config.api.is_empty() && config.api != CAMERA_API {
            return Err(ModuleError::Configuration(format!(
                "Unsupported api {} (this module serves {})",
                config.api, CAMERA_API
            )));
        }

        Ok(config)
    }
}

/// Parses the `grpc-timeout` header into the deadline the caller set.
pub fn request_timeout(metadata: &MetadataMap) -> Option<Duration> {
    let value = metadata.get("grpc-timeout")?.to_str().ok()?;
    if value.len() < 2 || value.len() > 9 {
        return None;
    }
    let (amount, unit) = value.split_at(value.len() - 1);
    let amount: u64 = amount.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(amount.checked_mul(3600)?)),
        "M" => Some(Duration::from_secs(amount.checked_mul(60)?)),
        "S" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_millis(amount)),
        "u" => Some(Duration::from_micros(amount)),
        "n" => Some(Duration::from_nanos(amount)),
        _ => None,
    }
}

#[tonic::async_trait]
impl<R: Resource + Camera> ModuleService for CameraModule<R> {
    async fn ready(
        &self,
        request: Request<ReadyRequest>,
    ) -> Result<Response<ReadyResponse>, Status> {
        info!("Module ready, parent at {}", request.into_inner().parent_address);

        Ok(Response::new(ReadyResponse {
            ready: true,
            handlers: vec![HandlerDefinition {
                api: CAMERA_API.to_string(),
                models: vec![R::MODEL.to_string()],
            }],
        }))
    }

    async fn validate_config(
        &self,
        request: Request<ValidateConfigRequest>,
    ) -> Result<Response<ValidateConfigResponse>, Status> {
        let config = Self::resource_config(request.into_inner().config)?;
        let dependencies = R::validate(&config)?;

        Ok(Response::new(ValidateConfigResponse { dependencies }))
    }

    async fn add_resource(
        &self,
        request: Request<AddResourceRequest>,
    ) -> Result<Response<AddResourceResponse>, Status> {
        let req = request.into_inner();
        let config = Self::resource_config(req.config)?;
        R::validate(&config)?;

        let resource = Arc::new(R::new(&config, &req.dependencies).await?);
        info!("Added resource {} ({})", config.name, config.model);

        let previous = self
            .resources
            .write()
            .await
            .insert(config.name.clone(), resource);
        if let Some(previous) = previous {
            warn!("Replaced existing resource {}", config.name);
            previous.close().await;
        }

        Ok(Response::new(AddResourceResponse {}))
    }

    async fn reconfigure_resource(
        &self,
        request: Request<ReconfigureResourceRequest>,
    ) -> Result<Response<ReconfigureResourceResponse>, Status> {
        let req = request.into_inner();
        let config = Self::resource_config(req.config)?;
        let resource = self.resource(&config.name).await?;

        resource.reconfigure(&config, &req.dependencies).await?;
        info!("Reconfigured resource {}", config.name);

        Ok(Response::new(ReconfigureResourceResponse {}))
    }

    async fn remove_resource(
        &self,
        request: Request<RemoveResourceRequest>,
    ) -> Result<Response<RemoveResourceResponse>, Status> {
        let name = request.into_inner().name;
        let resource = self
            .resources
            .write()
            .await
            .remove(&name)
            .ok_or_else(|| ModuleError::NotFound(name.clone()))?;

        resource.close().await;
        info!("Removed resource {}", name);

        Ok(Response::new(RemoveResourceResponse {}))
    }
}

#[tonic::async_trait]
impl<R: Resource + Camera> CameraService for CameraModule<R> {
    async fn get_image(
        &self,
        request: Request<GetImageRequest>,
    ) -> Result<Response<GetImageResponse>, Status> {
        let timeout = request_timeout(request.metadata());
        let req = request.into_inner();
        let resource = self.resource(&req.name).await?;

        let image = resource
            .get_image(&req.mime_type, req.extra.as_ref(), timeout)
            .await?;

        Ok(Response::new(GetImageResponse {
            mime_type: image.mime_type,
            image: image.data,
        }))
    }

    async fn get_images(
        &self,
        request: Request<GetImagesRequest>,
    ) -> Result<Response<GetImagesResponse>, Status> {
        let timeout = request_timeout(request.metadata());
        let resource = self.resource(&request.into_inner().name).await?;

        let (images, metadata) = resource.get_images(timeout).await?;

        Ok(Response::new(GetImagesResponse {
            images: images
                .into_iter()
                .map(|named| proto::Image {
                    source_name: named.source_name,
                    image: named.image.data,
                    mime_type: named.image.mime_type,
                })
                .collect(),
            response_metadata: Some(proto::ResponseMetadata {
                captured_at: Some(timestamp(metadata.captured_at)),
            }),
        }))
    }

    async fn get_point_cloud(
        &self,
        request: Request<GetPointCloudRequest>,
    ) -> Result<Response<GetPointCloudResponse>, Status> {
        let timeout = request_timeout(request.metadata());
        let req = request.into_inner();
        let resource = self.resource(&req.name).await?;

        let cloud = resource
            .get_point_cloud(req.extra.as_ref(), timeout)
            .await?;

        Ok(Response::new(GetPointCloudResponse {
            mime_type: cloud.mime_type,
            point_cloud: cloud.data,
        }))
    }

    async fn get_properties(
        &self,
        request: Request<GetPropertiesRequest>,
    ) -> Result<Response<GetPropertiesResponse>, Status> {
        let timeout = request_timeout(request.metadata());
        let resource = self.resource(&request.into_inner().name).await?;

        let properties = resource.get_properties(timeout).await?;

        Ok(Response::new(properties.into()))
    }
}

impl From<camera::Properties> for GetPropertiesResponse {
    fn from(properties: camera::Properties) -> Self {
        let intrinsics = properties.intrinsic_parameters;
        Self {
            supports_pcd: properties.supports_pcd,
            intrinsic_parameters: Some(proto::IntrinsicParameters {
                width_px: intrinsics.width_px,
                height_px: intrinsics.height_px,
                focal_x_px: intrinsics.focal_x_px,
                focal_y_px: intrinsics.focal_y_px,
                center_x_px: intrinsics.center_x_px,
                center_y_px: intrinsics.center_y_px,
            }),
            distortion_parameters: Some(proto::DistortionParameters {
                model: properties.distortion_parameters.model,
                parameters: properties.distortion_parameters.parameters,
            }),
            mime_types: properties.mime_types,
            frame_rate: properties.frame_rate,
        }
    }
}

fn timestamp(time: SystemTime) -> prost_types::Timestamp {
    let since_epoch = time
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    prost_types::Timestamp {
        seconds: since_epoch.as_secs() as i64,
        nanos: since_epoch.subsec_nanos() as i32,
    }
}
