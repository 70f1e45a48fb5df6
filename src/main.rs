use dotenvy::dotenv;
use tracing::info;

use scholarhub::config::server::ServerConfig;
use scholarhub::logging::init_tracing;
use scholarhub::router::init_router;
use scholarhub::scheduler::start_expiration_scheduler;
use scholarhub::state::init_app_state;
use scholarhub::utils::errors::expose_traces;

#[tokio::main]
async fn main() {
    dotenv().ok();

    init_tracing();

    let server_config = ServerConfig::from_env();
    expose_traces(!server_config.is_production());

    let state = init_app_state().await;

    sqlx::migrate!()
        .run(&state.db)
        .await
        .expect("Failed to run database migrations");

    start_expiration_scheduler(state.db.clone());

    let app = init_router(state);

    let addr = format!("0.0.0.0:{}", server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");

    info!(port = server_config.port, "Server running");
    axum::serve(listener, app)
        .await
        .expect("Server exited with an error");
}
