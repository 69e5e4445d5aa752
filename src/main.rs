use log::info;

use dinner_time::{api, AppConfig, AppError, JsonStore};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::init();

    let config = AppConfig::load()?;
    let store = JsonStore::new(config.data_dir.clone());
    store.ensure_dirs().await?;

    let addr = config.bind_addr();
    let state = api::AppState::new(store, config);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dinner Time server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
