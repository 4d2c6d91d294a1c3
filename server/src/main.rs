mod error;
mod routes;

use error::ServerError;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();

    let port = routes::port_from(std::env::var("PORT").ok().as_deref())?;
    let app = routes::app(std::env::var("PUBLIC_DIR").ok())?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await.map_err(ServerError::Bind)?;

    tracing::info!(%port, "seaton-web listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
