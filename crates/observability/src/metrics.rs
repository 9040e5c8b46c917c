//! Prometheus metrics.
//!
//! * `http_requests_total{status}` - requests served, by status code
//! * `http_request_duration_seconds` - request latency
//! * `http_requests_in_flight` - requests currently being handled
//! * `inventory_operations_total{operation,outcome}` - inventory operations
//! * `inventory_instruments` - instruments currently held

use metrics::{counter, gauge, histogram, Gauge, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use anyhow::Context;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Resolve `host:port` for the exporter. `host` may be an IP address
/// (IPv6 with or without brackets) or a hostname.
pub fn metrics_address(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let text = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    };
    text.to_socket_addrs()
        .with_context(|| format!("Failed to resolve metrics address {}", text))?
        .next()
        .with_context(|| format!("No address found for {}", text))
}

/// Install the Prometheus exporter, serving `/metrics` on `host:port`.
pub fn init_metrics(host: &str, port: u16) -> anyhow::Result<()> {
    let addr = metrics_address(host, port)?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// HTTP request metrics, recorded by the server middleware.
#[derive(Clone)]
pub struct ServerMetrics {
    request_duration: Histogram,
    in_flight: Gauge,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self {
            request_duration: histogram!("http_request_duration_seconds"),
            in_flight: gauge!("http_requests_in_flight"),
        }
    }

    /// Record a completed request.
    pub fn record_request(&self, duration: Duration, status_code: u16) {
        counter!("http_requests_total", "status" => status_code.to_string()).increment(1);
        self.request_duration.record(duration.as_secs_f64());
    }

    /// Start tracking a request. The returned guard records it when dropped.
    pub fn start_request(&self) -> RequestMetricsGuard<'_> {
        self.in_flight.increment(1.0);
        RequestMetricsGuard {
            metrics: self,
            start: Instant::now(),
            status_code: 500,
        }
    }
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Records duration and status of one request on drop.
///
/// The status stays 500 unless [`RequestMetricsGuard::set_status`] is called,
/// so a handler that panics is still counted as a failure.
pub struct RequestMetricsGuard<'a> {
    metrics: &'a ServerMetrics,
    start: Instant,
    status_code: u16,
}

impl RequestMetricsGuard<'_> {
    pub fn set_status(&mut self, code: u16) {
        self.status_code = code;
    }
}

impl Drop for RequestMetricsGuard<'_> {
    fn drop(&mut self) {
        self.metrics.in_flight.decrement(1.0);
        self.metrics
            .record_request(self.start.elapsed(), self.status_code);
    }
}

/// Inventory operation metrics.
#[derive(Clone)]
pub struct InventoryMetrics {
    instruments: Gauge,
}

impl InventoryMetrics {
    pub fn new() -> Self {
        Self {
            instruments: gauge!("inventory_instruments"),
        }
    }

    /// Count one operation. `outcome` is `ok` or the error kind.
    pub fn record_operation(&self, operation: &'static str, outcome: &'static str) {
        counter!(
            "inventory_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
    }

    pub fn set_instrument_count(&self, count: usize) {
        self.instruments.set(count as f64);
    }
}

impl Default for InventoryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // No recorder is installed in tests: every call goes to the no-op recorder.
    #[test]
    fn test_guard_records_without_recorder() {
        let metrics = ServerMetrics::new();
        {
            let mut guard = metrics.start_request();
            guard.set_status(201);
        }
        metrics.record_request(Duration::from_millis(3), 404);
    }

    #[test]
    fn test_inventory_metrics_without_recorder() {
        let metrics = InventoryMetrics::default();
        metrics.record_operation("add", "ok");
        metrics.record_operation("add", "conflict");
        metrics.set_instrument_count(2);
    }

    #[test]
    fn test_init_metrics_rejects_bad_host() {
        assert!(init_metrics("not a host", 9090).is_err());
    }

    #[test]
    fn test_metrics_address_accepts_hostnames_and_ipv6() {
        let addr = metrics_address("localhost", 19091).unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 19091);

        let addr = metrics_address("::1", 19092).unwrap();
        assert_eq!(addr, "[::1]:19092".parse::<SocketAddr>().unwrap());

        let addr = metrics_address("[::1]", 19093).unwrap();
        assert_eq!(addr.port(), 19093);

        let addr = metrics_address("0.0.0.0", 9090).unwrap();
        assert_eq!(addr, "0.0.0.0:9090".parse::<SocketAddr>().unwrap());
    }
}
