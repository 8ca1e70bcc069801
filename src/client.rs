//! Session client for the Home Assistant REST API.

use std::sync::Mutex;
use std::time::Duration;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::{ModuleError, Result};

/// Reusable session against one Home Assistant instance.
///
/// The underlying [`reqwest::Client`] pools connections and is safe to use
/// from concurrent tasks, so one session serves every request an adapter
/// receives. After [`HomeAssistantClient::close`] every fetch fails with
/// [`ModuleError::ClientClosed`].
#[derive(Debug)]
pub struct HomeAssistantClient {
    host_address: String,
    access_token: String,
    session: Mutex<Option<reqwest::Client>>,
}

impl HomeAssistantClient {
    /// Creates a session for `host_address` (a base URL including scheme)
    /// authenticated with `access_token`.
    pub fn new(host_address: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let session = reqwest::Client::builder()
            .build()
            .map_err(ModuleError::Transport)?;

        Ok(Self {
            host_address: host_address.into(),
            access_token: access_token.into(),
            session: Mutex::new(Some(session)),
        })
    }

    /// Base URL requests are sent to.
    pub fn host_address(&self) -> &str {
        &self.host_address
    }

    /// URL of the camera proxy endpoint for `entity_id`.
    pub fn snapshot_url(&self, entity_id: &str) -> String {
        format!("{}/api/camera_proxy/{}", self.host_address, entity_id)
    }

    /// Fetches the latest frame of `entity_id`.
    ///
    /// Returns `Ok(None)` when the platform answered successfully with an
    /// empty body. The body is returned verbatim; its content type is not
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Transport`] on connection failure or a
    /// non-success status, and [`ModuleError::Timeout`] if no complete
    /// response arrived within `timeout`.
    pub async fn fetch_snapshot(
        &self,
        entity_id: &str,
        timeout: Duration,
    ) -> Result<Option<Vec<u8>>> {
        let session = self.session()?;
        let url = self.snapshot_url(entity_id);
        debug!("Requesting camera snapshot from {} (timeout {:?})", url, timeout);

        let response = session
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| request_error(e, timeout))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| request_error(e, timeout))?;

        debug!("Received {} byte snapshot from {}", body.len(), url);

        if body.is_empty() {
            Ok(None)
        } else {
            Ok(Some(body.to_vec()))
        }
    }

    /// Releases the pooled connections held by this session.
    ///
    /// Requests already in flight complete; later fetches fail.
    pub fn close(&self) {
        if let Ok(mut session) = self.session.lock() {
            if session.take().is_some() {
                debug!("Closed Home Assistant session for {}", self.host_address);
            }
        }
    }

    /// Returns true once [`HomeAssistantClient::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.session.lock().map(|s| s.is_none()).unwrap_or(true)
    }

    fn session(&self) -> Result<reqwest::Client> {
        self.session
            .lock()
            .ok()
            .and_then(|session| session.clone())
            .ok_or_else(|| ModuleError::ClientClosed(self.host_address.clone()))
    }
}

fn request_error(err: reqwest::Error, timeout: Duration) -> ModuleError {
    if err.is_timeout() {
        ModuleError::Timeout(timeout)
    } else {
        ModuleError::Transport(err)
    }
}
