//! # homeassistant-camera
//!
//! Exposes a [Home Assistant](https://www.home-assistant.io) camera entity as a
//! robot camera component.
//!
//! The module runs as a child process of the robot runtime. The runtime calls
//! the lifecycle service (validate, add, reconfigure, remove) to manage named
//! camera resources, and the camera service to fetch frames. Each frame is a
//! single authenticated `GET {host_address}/api/camera_proxy/{entity_id}`
//! against Home Assistant, returned verbatim as a JPEG image.
//!
//! ## Configuration
//!
//! ```json
//! {
//!   "host_address": "http://homeassistant.local:8123",
//!   "access_token": "<long-lived access token>",
//!   "entity_id": "camera.front_door"
//! }
//! ```
//!
//! `host_address` is optional and defaults to
//! [`DEFAULT_HOST_ADDRESS`](constants::DEFAULT_HOST_ADDRESS). `access_token`
//! and `entity_id` are required.
//!
//! ## Layout
//!
//! - [`Resource`] and [`Camera`] are host-agnostic contracts;
//!   [`HomeAssistantCamera`] implements both.
//! - [`CameraModule`] translates the gRPC services into calls on those
//!   contracts, and [`serve()`] runs it on a Unix socket or TCP address.
//!
//! ```rust,no_run
//! use homeassistant_camera::{serve, CameraModule, HomeAssistantCamera};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     serve(CameraModule::<HomeAssistantCamera>::new(), None).await?;
//!     Ok(())
//! }
//! ```

// Wire messages and generated service code.
#[allow(clippy::all)]
#[allow(missing_docs)]
pub mod proto;

pub mod camera;
pub mod client;
pub mod config;
pub mod constants;
mod error;
pub mod homeassistant;
pub mod module;
pub mod resource;
mod server;

// Re-export public API.
pub use camera::{Camera, Image, Properties};
pub use client::HomeAssistantClient;
pub use config::CameraConfig;
pub use error::{ModuleError, Result};
pub use homeassistant::HomeAssistantCamera;
pub use module::CameraModule;
pub use resource::{Model, Resource, ResourceConfig};
pub use server::serve;
