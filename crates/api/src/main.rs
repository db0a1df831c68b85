use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ventra_observability::init();

    let config = ventra_api::config::Config::load().context("invalid configuration")?;
    let port = config.port;

    let app = ventra_api::app::build_app(config)
        .await
        .context("failed to build application")?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind 0.0.0.0:{port}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
