//! Camera capability contract and the values it exchanges.

use std::time::{Duration, SystemTime};

use prost_types::Struct;

use crate::{ModuleError, Result};

/// A single encoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Image {
    /// Wraps encoded `data` tagged with `mime_type`.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// A frame tagged with the imager that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImage {
    pub source_name: String,
    pub image: Image,
}

/// Metadata returned alongside simultaneous captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub captured_at: SystemTime,
}

/// Encoded point cloud together with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointCloud {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Pinhole intrinsics. All zeros means no calibration is known.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntrinsicParameters {
    pub width_px: u32,
    pub height_px: u32,
    pub focal_x_px: f64,
    pub focal_y_px: f64,
    pub center_x_px: f64,
    pub center_y_px: f64,
}

/// Lens distortion model and coefficients. Empty means none is known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistortionParameters {
    pub model: String,
    pub parameters: Vec<f64>,
}

/// Static description of what a camera can deliver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    pub supports_pcd: bool,
    pub intrinsic_parameters: IntrinsicParameters,
    pub distortion_parameters: DistortionParameters,
    pub mime_types: Vec<String>,
    pub frame_rate: Option<f32>,
}

/// Camera capability.
///
/// `get_images` and `get_point_cloud` default to
/// [`ModuleError::Unsupported`]; single-imager cameras without depth data only
/// implement [`Camera::get_image`] and [`Camera::get_properties`].
#[tonic::async_trait]
pub trait Camera: Send + Sync + 'static {
    /// Returns the next frame. `mime_type` is a hint and does not guarantee
    /// the returned format. A `timeout` of `None` leaves the deadline to the
    /// implementation.
    async fn get_image(
        &self,
        mime_type: &str,
        extra: Option<&Struct>,
        timeout: Option<Duration>,
    ) -> Result<Image>;

    /// Returns simultaneous frames from every imager of the camera.
    async fn get_images(
        &self,
        _timeout: Option<Duration>,
    ) -> Result<(Vec<NamedImage>, ResponseMetadata)> {
        Err(ModuleError::Unsupported("get_images"))
    }

    /// Returns the next point cloud.
    async fn get_point_cloud(
        &self,
        _extra: Option<&Struct>,
        _timeout: Option<Duration>,
    ) -> Result<PointCloud> {
        Err(ModuleError::Unsupported("get_point_cloud"))
    }

    /// Returns intrinsic and distortion parameters.
    async fn get_properties(&self, timeout: Option<Duration>) -> Result<Properties>;
}
