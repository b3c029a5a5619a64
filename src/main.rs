use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sporelay::{config::Config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sporelay=info,tower_http=info")),
        )
        .with(fmt::layer())
        .init();

    let config = Config::load();
    server::serve(config).await
}
