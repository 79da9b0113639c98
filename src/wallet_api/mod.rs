//! HTTP surface of the wallet aggregator.
use std::{
    convert::Infallible,
    net::{AddrParseError, SocketAddr},
    sync::Arc,
};

use config::ServerConfig;
use hyper::{body::Incoming, Request};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server,
    service::TowerToHyperService,
};
use router::WalletApi;
use thiserror::Error;
use tokio::{net::TcpListener, sync::Semaphore, task::JoinHandle};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::providers::ledger_provider::LedgerProvider;

pub mod config;
pub mod response;
pub mod router;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    ParseError(#[from] AddrParseError),
}

/// Binds the configured address and serves `api` on it in a background task.
///
/// At most `max_connections` connections are served at once, further ones
/// wait in the accept queue.
///
/// # Errors
///
/// Will return `Err` if the address is malformed or cannot be bound.
pub async fn run_server<P>(api: WalletApi<P>, config: ServerConfig) -> Result<(SocketAddr, JoinHandle<()>), ServerError>
where
    P: LedgerProvider + Send + Sync + 'static,
{
    let ServerConfig { socket_addr, max_connections } = config;

    let listener = TcpListener::bind(socket_addr.parse::<SocketAddr>()?).await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(accept_loop(listener, api, Arc::new(Semaphore::new(max_connections))));

    Ok((addr, handle))
}

async fn accept_loop<P>(listener: TcpListener, api: WalletApi<P>, connections: Arc<Semaphore>)
where
    P: LedgerProvider + Send + Sync + 'static,
{
    loop {
        let Ok(permit) = Arc::clone(&connections).acquire_owned().await else {
            return;
        };

        let (tcp, remote) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::warn!(%err, "failed to accept connection");
                continue;
            }
        };

        let api = api.clone();
        let service = ServiceBuilder::new().layer(CorsLayer::permissive()).service(tower::service_fn(
            move |request: Request<Incoming>| {
                let api = api.clone();
                async move { Ok::<_, Infallible>(api.handle(request).await) }
            },
        ));

        tokio::spawn(async move {
            let conn = server::conn::auto::Builder::new(TokioExecutor::new());
            if let Err(err) = conn.serve_connection(TokioIo::new(tcp), TowerToHyperService::new(service)).await {
                tracing::debug!(%remote, %err, "connection closed with error");
            }
            drop(permit);
        });
    }
}
