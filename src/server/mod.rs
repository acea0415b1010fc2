// file: src/server/mod.rs
// description: browser ui and json api over the ask pipeline
// reference: https://docs.rs/axum

mod page;
mod routes;

pub use page::{PageView, render_page};
pub use routes::{AppState, AskRequest, ErrorBody, MAX_QUESTION_CHARS, router};

use crate::config::ServerConfig;
use crate::error::{PipelineError, Result};
use crate::pipeline::AskPipeline;
use std::sync::Arc;
use tracing::info;

pub async fn serve(pipeline: Arc<AskPipeline>, config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Serving on http://{}", addr);

    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PipelineError::Server(e.to_string()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
