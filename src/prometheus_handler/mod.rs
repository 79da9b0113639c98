use std::time::Duration;

use hyper::StatusCode;
use prometheus::{core::Collector, Encoder, TextEncoder};

pub use prometheus::{
    self, exponential_buckets, Error as PrometheusError, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts,
    Registry, TEXT_FORMAT,
};

/// Adds `metric` to `registry` and hands it back for recording.
fn registered<M>(registry: &Registry, metric: M) -> Result<M, PrometheusError>
where
    M: Collector + Clone + 'static,
{
    registry.register(Box::new(metric.clone())).map(|()| metric)
}

/// Metrics of the wallet API, registered once at startup and shared by all
/// requests.
#[derive(Debug, Clone)]
pub struct WalletMetrics {
    requests: IntCounterVec,
    balance_fetch_duration: Histogram,
    balance_fetch_failures: IntCounter,
}

impl WalletMetrics {
    pub fn register(registry: &Registry) -> Result<Self, PrometheusError> {
        let requests = IntCounterVec::new(
            Opts::new("wallet_requests_total", "Number of HTTP requests served, by route and status"),
            &["route", "status"],
        )?;
        let balance_fetch_duration = Histogram::with_opts(
            HistogramOpts::new("wallet_balance_fetch_seconds", "Duration of a single balance query")
                .buckets(exponential_buckets(0.01, 2.0, 12)?),
        )?;
        let balance_fetch_failures =
            IntCounter::new("wallet_balance_fetch_failures_total", "Number of failed balance queries")?;

        Ok(Self {
            requests: registered(registry, requests)?,
            balance_fetch_duration: registered(registry, balance_fetch_duration)?,
            balance_fetch_failures: registered(registry, balance_fetch_failures)?,
        })
    }

    pub fn observe_request(&self, route: &str, status: StatusCode) {
        self.requests.with_label_values(&[route, status.as_str()]).inc();
    }

    pub fn observe_balance_fetch(&self, elapsed: Duration, success: bool) {
        self.balance_fetch_duration.observe(elapsed.as_secs_f64());
        if !success {
            self.balance_fetch_failures.inc();
        }
    }
}

/// Encodes every metric of the registry in the Prometheus text format.
pub fn gather(registry: &Registry) -> Result<Vec<u8>, PrometheusError> {
    let metric_families = registry.gather();
    let mut buffer = vec![];
    TextEncoder::new().encode(&metric_families, &mut buffer)?;
    Ok(buffer)
}
