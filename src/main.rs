use std::net::SocketAddr;
use std::sync::Arc;

use cvmaker_backend::{
    config::{get_config, init_config, LogFormat},
    database::pool::create_pool,
    routes,
    services::{
        cv_store::{CvStore, MemoryCvStore, PgCvStore},
        user_store::{MemoryUserStore, PgUserStore, UserStore},
    },
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();
    init_tracing(config.log_format);

    let (cv_store, user_store): (Arc<dyn CvStore>, Arc<dyn UserStore>) =
        match config.database_url.as_deref() {
            Some(url) => {
                let pool = create_pool(url).await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("Connected to Postgres, migrations applied");
                (
                    Arc::new(PgCvStore::new(pool.clone())),
                    Arc::new(PgUserStore::new(pool)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL is not set; data lives in memory and is lost on restart");
                (
                    Arc::new(MemoryCvStore::new()),
                    Arc::new(MemoryUserStore::new()),
                )
            }
        };

    let app_state = AppState::new(config, cv_store, user_store);
    let app = routes::build_router(app_state, config);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
