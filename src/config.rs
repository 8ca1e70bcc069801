//! Attribute extraction and validation for the Home Assistant camera.

use prost_types::value::Kind;
use prost_types::{Struct, Value};
use serde::Deserialize;

use crate::constants::DEFAULT_HOST_ADDRESS;
use crate::{ModuleError, Result};

/// Attributes as they appear in the user's configuration.
#[derive(Debug, Default, Deserialize)]
struct RawAttributes {
    #[serde(default)]
    host_address: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    entity_id: Option<String>,
}

/// Validated camera configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConfig {
    /// Base URL of the Home Assistant instance, always carrying a scheme.
    pub host_address: String,
    /// Long-lived access token sent as a bearer credential.
    pub access_token: String,
    /// Camera entity to proxy, e.g. `camera.front_door`.
    pub entity_id: String,
}

impl CameraConfig {
    /// Extracts and validates the configuration from resource attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Configuration`] if `access_token` or `entity_id`
    /// is missing or empty, or if any attribute has the wrong type.
    pub fn from_attributes(attributes: &Struct) -> Result<Self> {
        let raw: RawAttributes = serde_json::from_value(struct_to_json(attributes))
            .map_err(|e| ModuleError::Configuration(format!("Invalid attributes: {}", e)))?;

        let access_token = raw.access_token.unwrap_or_default();
        if access_token.is_empty() {
            return Err(ModuleError::Configuration(
                "An access_token must be provided".to_string(),
            ));
        }

        let entity_id = raw.entity_id.unwrap_or_default();
        if entity_id.is_empty() {
            return Err(ModuleError::Configuration(
                "An entity_id must be defined".to_string(),
            ));
        }

        let host_address = raw
            .host_address
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_HOST_ADDRESS);

        Ok(Self {
            host_address: normalize_host(host_address),
            access_token,
            entity_id,
        })
    }
}

/// Prepends `http://` to bare `host:port` addresses and drops trailing slashes.
pub fn normalize_host(host_address: &str) -> String {
    let host = host_address.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

/// Converts a protobuf `Struct` into the equivalent JSON object.
pub fn struct_to_json(value: &Struct) -> serde_json::Value {
    serde_json::Value::Object(
        value
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value_to_json(value)))
            .collect(),
    )
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match &value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(*b),
        Some(Kind::NumberValue(n)) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s.clone()),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.iter().map(value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => struct_to_json(s),
    }
}
