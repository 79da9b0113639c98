use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Limited};
use hyper::{body::Body, header::HeaderValue, Method, Request, StatusCode};
use prometheus::Registry;
use tracing::instrument;

use super::response::{self, ApiError, HttpResponse};
use crate::{
    constants::MAX_REQUEST_BODY_SIZE,
    models::wallet::AggregateRequest,
    prometheus_handler::{self, WalletMetrics, TEXT_FORMAT},
    providers::{aggregator::WalletAggregator, ledger_provider::LedgerProvider},
};

pub const AGGREGATE_PATH: &str = "/api/wallet/aggregate";
pub const BALANCE_PATH: &str = "/api/wallet/balance";
pub const METADATA_PATH: &str = "/api/wallet/metadata";
pub const HEALTH_PATH: &str = "/health";
pub const METRICS_PATH: &str = "/metrics";

/// Routes HTTP requests to the wallet aggregator.
#[derive(Debug)]
pub struct WalletApi<P> {
    aggregator: Arc<WalletAggregator<P>>,
    registry: Registry,
    metrics: Option<WalletMetrics>,
}

impl<P> Clone for WalletApi<P> {
    fn clone(&self) -> Self {
        Self { aggregator: Arc::clone(&self.aggregator), registry: self.registry.clone(), metrics: self.metrics.clone() }
    }
}

impl<P> WalletApi<P>
where
    P: LedgerProvider + Send + Sync + 'static,
{
    /// Routes requests to `aggregator`. Metrics are not recorded, `/metrics`
    /// serves an empty registry.
    pub fn new(aggregator: WalletAggregator<P>) -> Self {
        Self { aggregator: Arc::new(aggregator), registry: Registry::default(), metrics: None }
    }

    /// Registers the wallet metrics into `registry`, records requests and
    /// balance queries into them and serves them on `/metrics`.
    pub fn with_registry(aggregator: WalletAggregator<P>, registry: Registry) -> Result<Self, ApiError> {
        let metrics = WalletMetrics::register(&registry)?;
        let aggregator = aggregator.with_metrics(metrics.clone());
        Ok(Self { aggregator: Arc::new(aggregator), registry, metrics: Some(metrics) })
    }

    pub async fn handle<B>(&self, request: Request<B>) -> HttpResponse
    where
        B: Body + Send,
        B::Data: Send,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let method = request.method().clone();
        let path = request.uri().path().to_owned();

        let response = match (&method, path.as_str()) {
            (&Method::POST, AGGREGATE_PATH) => self.aggregate(request).await,
            (&Method::GET, BALANCE_PATH) => self.balance(request.uri().query()).await,
            (&Method::GET, METADATA_PATH) => response::build(self.aggregator.metadata().await),
            (&Method::GET, HEALTH_PATH) => response::build(self.aggregator.health().await),
            (&Method::GET, METRICS_PATH) => self.gather_metrics(),
            (_, AGGREGATE_PATH | BALANCE_PATH | METADATA_PATH | HEALTH_PATH | METRICS_PATH) => {
                ApiError::MethodNotAllowed.into_response()
            }
            _ => ApiError::NotFound.into_response(),
        };

        tracing::info!(%method, path = %path, status = response.status().as_u16(), "request served");
        if let Some(metrics) = &self.metrics {
            metrics.observe_request(route_label(&path), response.status());
        }

        response
    }

    #[instrument(skip_all, name = "wallet::aggregate")]
    async fn aggregate<B>(&self, request: Request<B>) -> HttpResponse
    where
        B: Body + Send,
        B::Data: Send,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let body = match read_body(request.into_body()).await {
            Ok(body) => body,
            Err(err) => return err.into_response(),
        };
        let AggregateRequest { addresses } = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(err) => return ApiError::InvalidBody(err.to_string()).into_response(),
        };

        response::build(self.aggregator.aggregate(&addresses).await)
    }

    #[instrument(skip_all, name = "wallet::balance")]
    async fn balance(&self, query: Option<&str>) -> HttpResponse {
        let address = query
            .and_then(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == "address")
                    .map(|(_, value)| value.into_owned())
            })
            .unwrap_or_default();

        response::build(self.aggregator.balance(&address).await)
    }

    fn gather_metrics(&self) -> HttpResponse {
        match prometheus_handler::gather(&self.registry) {
            Ok(buffer) => {
                response::with_content_type(StatusCode::OK, buffer.into(), HeaderValue::from_static(TEXT_FORMAT))
            }
            Err(err) => ApiError::from(err).into_response(),
        }
    }
}

/// Reads the whole body, refusing bodies larger than [`MAX_REQUEST_BODY_SIZE`].
async fn read_body<B>(body: B) -> Result<Bytes, ApiError>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, MAX_REQUEST_BODY_SIZE).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<http_body_util::LengthLimitError>().is_some() => Err(ApiError::BodyTooLarge),
        Err(err) => Err(ApiError::InvalidBody(err.to_string())),
    }
}

/// Bounded set of route labels, so that unknown paths do not grow the metrics.
fn route_label(path: &str) -> &'static str {
    match path {
        AGGREGATE_PATH => "aggregate",
        BALANCE_PATH => "balance",
        METADATA_PATH => "metadata",
        HEALTH_PATH => "health",
        METRICS_PATH => "metrics",
        _ => "unknown",
    }
}
