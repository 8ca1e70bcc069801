use homeassistant_camera::{serve, CameraModule, HomeAssistantCamera};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    serve(CameraModule::<HomeAssistantCamera>::new(), None).await?;

    Ok(())
}
