use std::sync::Arc;

use clap::Args;
use driftlog_core::AuditStore;
use driftlog_store::{MemoryAuditStore, RedisAuditStore};
use driftlog_writer::{configure_routes, AuditWriter, AuditWriterConfig, WriterApiDoc, WriterState};
use tokio::net::TcpListener;
use tracing::{error, info};
use utoipa::OpenApi;

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1:3000", env = "DRIFTLOG_ADDRESS")]
    pub address: String,

    /// Name of the audit table entries are written under
    #[arg(long, env = "TARGET_TABLE")]
    pub target_table: String,

    /// Redis connection URL for the audit store; the in-memory store is
    /// used when absent
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,
}

impl ServeCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.serve())
    }

    async fn serve(self) -> anyhow::Result<()> {
        let store: Arc<dyn AuditStore> = match &self.redis_url {
            Some(url) => {
                info!("Using Redis audit store at {}", url);
                Arc::new(RedisAuditStore::connect(url).await?)
            }
            None => {
                info!("No Redis URL configured, using in-memory audit store");
                Arc::new(MemoryAuditStore::new())
            }
        };

        let writer = Arc::new(AuditWriter::new(
            store,
            AuditWriterConfig {
                table: self.target_table.clone(),
            },
        ));
        let state = Arc::new(WriterState::new(writer));

        let app = configure_routes()
            .route("/api-docs/openapi.json", axum::routing::get(openapi_json))
            .with_state(state);

        let listener = TcpListener::bind(&self.address).await?;
        info!(
            "Driftlog server listening on {}, writing to table {}",
            self.address, self.target_table
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Driftlog server exited");
        Ok(())
    }
}

async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(WriterApiDoc::openapi())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
