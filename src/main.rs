use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ai_photo_editor::{api, config, GeminiClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    config::Config::dotenv_load();
    let config = config::Config::new()?;
    config.print_env_vars();

    let api_key = config.require_api_key().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;
    let model = GeminiClient::new(
        config.gemini_base_url.clone(),
        api_key.to_string(),
        config.image_model.clone(),
        config.text_model.clone(),
    );
    let state = Arc::new(api::routes::AppState { model: Arc::new(model) });
    let app = api::routes::build_router(state);

    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 0.0.0.0", host_str);
        std::net::IpAddr::from([0, 0, 0, 0])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid PORT '{}', falling back to 3000", port_str);
        3000
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("relay listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
