//! Stand-in for a Home Assistant instance: records raw requests and answers
//! every connection with a fixed status and body.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use homeassistant_camera::ResourceConfig;
use prost_types::value::Kind;
use prost_types::{Struct, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct StubServer {
    pub address: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Starts a stub answering with `status` and `body`.
    pub async fn start(status: u16, body: &'static [u8]) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    /// Starts a stub that waits `delay` before answering.
    pub async fn start_delayed(status: u16, body: &'static [u8], delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                recorded
                    .lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&request).into_owned());

                tokio::time::sleep(delay).await;

                let reason = if status == 200 { "OK" } else { "Error" };
                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    reason,
                    body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(body).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { address, requests }
    }

    /// `host_address` attribute pointing at this stub, without a scheme.
    pub fn host_address(&self) -> String {
        self.address.to_string()
    }

    /// Raw requests received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn attributes(pairs: &[(&str, &str)]) -> Struct {
    Struct {
        fields: pairs
            .iter()
            .map(|(key, value)| {
                (
                    key.to_string(),
                    Value {
                        kind: Some(Kind::StringValue(value.to_string())),
                    },
                )
            })
            .collect(),
    }
}

pub fn resource_config(name: &str, pairs: &[(&str, &str)]) -> ResourceConfig {
    ResourceConfig {
        name: name.to_string(),
        api: "rdk:component:camera".to_string(),
        model: "hipsterbrown:camera:homeassistant".to_string(),
        attributes: attributes(pairs),
    }
}
