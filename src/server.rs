use crate::camera::Camera;
use crate::module::CameraModule;
use crate::proto::camera_service_server::CameraServiceServer;
use crate::proto::module_service_server::ModuleServiceServer;
use crate::resource::Resource;
use crate::{ModuleError, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tonic::transport::server::Router;
use tonic::transport::Server;
use tracing::{info, warn};

#[cfg(unix)]
use tokio::net::UnixListener;

/// Command-line arguments for the module server.
#[derive(Parser, Debug)]
#[command(author, version, about = "Home Assistant camera module", long_about = None)]
struct Args {
    /// Address to serve the module on (socket path for unix, host:port for tcp).
    address: String,

    /// Network type (unix or tcp).
    #[arg(long, default_value = "unix")]
    network: String,
}

/// Serves a camera module on the address given on the command line.
///
/// This is the main entry point of the module process. It handles:
/// - Command-line argument parsing (the serving address is required)
/// - Server setup (Unix socket or TCP)
/// - Graceful shutdown on SIGINT/SIGTERM
/// - Closing every registered resource once the server stops
/// - Automatic cleanup of Unix socket files
///
/// # Arguments
///
/// * `module` - The module holding the resources to serve
/// * `args` - Optional command-line arguments (defaults to std::env::args())
pub async fn serve<R: Resource + Camera>(
    module: CameraModule<R>,
    args: Option<Vec<String>>,
) -> Result<()> {
    // Parse command-line arguments.
    let args = if let Some(args) = args {
        Args::parse_from(args)
    } else {
        Args::parse()
    };

    info!(
        "Starting {} module on {} ({})",
        R::MODEL,
        args.address,
        args.network
    );

    // Both services share the same resource registry.
    let module = Arc::new(module);
    let router = Server::builder()
        .add_service(ModuleServiceServer::from_arc(module.clone()))
        .add_service(CameraServiceServer::from_arc(module.clone()));

    // Serve based on network type.
    let served = match args.network.as_str() {
        "unix" => serve_unix(router, &args.address).await,
        "tcp" => serve_tcp(router, &args.address).await,
        network => Err(ModuleError::Server(format!("Unsupported network type: {}", network))),
    };

    module.close_all().await;
    served
}

#[cfg(unix)]
async fn serve_unix(router: Router, address: &str) -> Result<()> {
    use tokio_stream::wrappers::UnixListenerStream;

    let path = PathBuf::from(address);

    // Remove existing socket file if it exists.
    if path.exists() {
        warn!("Removing existing socket file: {}", address);
        std::fs::remove_file(&path)?;
    }

    let listener = UnixListener::bind(&path)?;
    let stream = UnixListenerStream::new(listener);

    info!("Listening on Unix socket: {}", address);

    router
        .serve_with_incoming_shutdown(stream, shutdown_signal())
        .await?;

    // Clean up socket file on shutdown.
    if path.exists() {
        info!("Cleaning up socket file: {}", address);
        let _ = std::fs::remove_file(&path);
    }

    Ok(())
}

#[cfg(not(unix))]
async fn serve_unix(_router: Router, _address: &str) -> Result<()> {
    Err(ModuleError::Server("Unix sockets not supported on this platform".to_string()))
}

async fn serve_tcp(router: Router, address: &str) -> Result<()> {
    let addr = address
        .parse()
        .map_err(|e| ModuleError::Configuration(format!("Invalid TCP address: {}", e)))?;

    info!("Listening on TCP: {}", address);

    router.serve_with_shutdown(addr, shutdown_signal()).await?;

    Ok(())
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, shutting down gracefully");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        }
    }
}
