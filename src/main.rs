use study_planner::api::{app_router, ApiState};
use study_planner::app::App;
use study_planner::config::Config;
use study_planner::db::Db;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let db = Db::new(&config.database_url).await?;
    let app = App::new(db, config.user_id.clone(), config.scheduler).await?;

    let mut router = app_router(ApiState {
        app: Arc::new(Mutex::new(app)),
    });
    if let Some(dir) = &config.static_dir {
        log::info!("Serving web client from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("Study planner for '{}' listening on {}", config.user_id, config.bind_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
