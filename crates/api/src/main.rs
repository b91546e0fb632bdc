#[tokio::main]
async fn main() {
    quill_observability::init();

    let config = quill_api::config::AppConfig::from_env();
    let addr = config.bind_addr;

    let app = quill_api::app::build_app(config).await;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await.expect("server error");
}
