//! Wire messages for the module lifecycle and camera services.
//!
//! The service plumbing (`module_service_server`, `camera_service_server` and
//! their clients) is generated by `build.rs`; the messages it carries live here.

use prost_types::{Struct, Timestamp};

include!(concat!(env!("OUT_DIR"), "/viam.module.v1.ModuleService.rs"));
include!(concat!(
    env!("OUT_DIR"),
    "/viam.component.camera.v1.CameraService.rs"
));

/// Configuration of a single component as delivered by the host runtime.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ComponentConfig {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "4")]
    pub model: String,
    #[prost(message, optional, tag = "8")]
    pub attributes: Option<Struct>,
    #[prost(string, tag = "9")]
    pub api: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReadyRequest {
    #[prost(string, tag = "1")]
    pub parent_address: String,
}

/// An API together with the models this module serves for it.
#[derive(Clone, PartialEq, prost::Message)]
pub struct HandlerDefinition {
    #[prost(string, tag = "1")]
    pub api: String,
    #[prost(string, repeated, tag = "2")]
    pub models: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReadyResponse {
    #[prost(bool, tag = "1")]
    pub ready: bool,
    #[prost(message, repeated, tag = "2")]
    pub handlers: Vec<HandlerDefinition>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddResourceRequest {
    #[prost(message, optional, tag = "1")]
    pub config: Option<ComponentConfig>,
    #[prost(string, repeated, tag = "2")]
    pub dependencies: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct AddResourceResponse {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReconfigureResourceRequest {
    #[prost(message, optional, tag = "1")]
    pub config: Option<ComponentConfig>,
    #[prost(string, repeated, tag = "2")]
    pub dependencies: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ReconfigureResourceResponse {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RemoveResourceRequest {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct RemoveResourceResponse {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ValidateConfigRequest {
    #[prost(message, optional, tag = "1")]
    pub config: Option<ComponentConfig>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ValidateConfigResponse {
    #[prost(string, repeated, tag = "1")]
    pub dependencies: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetImageRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub mime_type: String,
    #[prost(message, optional, tag = "99")]
    pub extra: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetImageResponse {
    #[prost(string, tag = "1")]
    pub mime_type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub image: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetImagesRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "99")]
    pub extra: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Image {
    #[prost(string, tag = "1")]
    pub source_name: String,
    #[prost(bytes = "vec", tag = "2")]
    pub image: Vec<u8>,
    #[prost(string, tag = "3")]
    pub mime_type: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResponseMetadata {
    #[prost(message, optional, tag = "1")]
    pub captured_at: Option<Timestamp>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetImagesResponse {
    #[prost(message, repeated, tag = "1")]
    pub images: Vec<Image>,
    #[prost(message, optional, tag = "2")]
    pub response_metadata: Option<ResponseMetadata>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetPointCloudRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub mime_type: String,
    #[prost(message, optional, tag = "99")]
    pub extra: Option<Struct>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetPointCloudResponse {
    #[prost(string, tag = "1")]
    pub mime_type: String,
    #[prost(bytes = "vec", tag = "2")]
    pub point_cloud: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetPropertiesRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "99")]
    pub extra: Option<Struct>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct IntrinsicParameters {
    #[prost(uint32, tag = "1")]
    pub width_px: u32,
    #[prost(uint32, tag = "2")]
    pub height_px: u32,
    #[prost(double, tag = "3")]
    pub focal_x_px: f64,
    #[prost(double, tag = "4")]
    pub focal_y_px: f64,
    #[prost(double, tag = "5")]
    pub center_x_px: f64,
    #[prost(double, tag = "6")]
    pub center_y_px: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DistortionParameters {
    #[prost(string, tag = "1")]
    pub model: String,
    #[prost(double, repeated, tag = "2")]
    pub parameters: Vec<f64>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetPropertiesResponse {
    #[prost(bool, tag = "1")]
    pub supports_pcd: bool,
    #[prost(message, optional, tag = "2")]
    pub intrinsic_parameters: Option<IntrinsicParameters>,
    #[prost(message, optional, tag = "3")]
    pub distortion_parameters: Option<DistortionParameters>,
    #[prost(string, repeated, tag = "4")]
    pub mime_types: Vec<String>,
    #[prost(float, optional, tag = "5")]
    pub frame_rate: Option<f32>,
}
