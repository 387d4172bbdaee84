use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spotify_roast::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail fast: a panic anywhere takes the process down for the supervisor to restart.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("unrecoverable fault: {}", info);
        std::process::exit(1);
    }));

    let config = Config::from_env()?;
    tracing::info!("configuration loaded: {:?}", config);

    let app = spotify_roast::app(&config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
