use std::net::SocketAddr;

use axum::Router;
use configs::BindConfig;
use tracing::info;

use crate::kind::{ServiceKind, VERSION};
use crate::routes;

/// Parse the resolved host/port into a socket address.
fn bind_addr(bind: &BindConfig) -> anyhow::Result<SocketAddr> {
    Ok(bind.addr().parse()?)
}

/// Resolve when Ctrl+C (or SIGTERM on unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutdown signal received, draining connections");
}

/// Build the app for `kind` and serve it until a shutdown signal arrives.
pub async fn run(kind: ServiceKind, bind: BindConfig) -> anyhow::Result<()> {
    let app: Router = routes::build_router(kind);

    let addr = bind_addr(&bind)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(service = kind.name(), version = VERSION, %addr, "{} v{} running on port {}", kind.name(), VERSION, bind.port);
    info!("Health check available at http://localhost:{}/health", bind.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
