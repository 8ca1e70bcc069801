use std::time::Duration;

use crate::resource::Model;

/// Host address used when the configuration does not name one.
pub const DEFAULT_HOST_ADDRESS: &str = "homeassistant.local:8123";

/// Upper bound on a single snapshot request when the caller supplies no deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// API triple of the camera capability.
pub const CAMERA_API: &str = "rdk:component:camera";

/// Model this module registers for the camera API.
pub const HOMEASSISTANT_MODEL: Model = Model::new("hipsterbrown", "camera", "homeassistant");

/// Mime type tag for images returned by the camera proxy.
pub const MIME_TYPE_JPEG: &str = "image/jpeg";
