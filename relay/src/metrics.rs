//! Prometheus metrics for the admin relay.
//!
//! [`RelayMetrics`] owns a dedicated [`Registry`] that the `/metrics` endpoint
//! encodes into the Prometheus text exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry, Encoder, Histogram,
    HistogramOpts, IntCounter, Opts, Registry, TextEncoder,
};

pub struct RelayMetrics {
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Overrides the ledger accepted.
    pub overrides_accepted: IntCounter,
    /// Overrides that reached the ledger and were rejected or failed.
    pub overrides_rejected: IntCounter,
    /// Requests turned away before reaching the ledger for bad credentials.
    pub unauthorized_requests: IntCounter,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Time spent in the ledger write, in milliseconds.
    pub ledger_write_ms: Histogram,
}

impl RelayMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let overrides_accepted = register_int_counter_with_registry!(
            Opts::new(
                "faceid_relay_overrides_accepted_total",
                "Verification overrides accepted by the ledger"
            ),
            registry
        )?;

        let overrides_rejected = register_int_counter_with_registry!(
            Opts::new(
                "faceid_relay_overrides_rejected_total",
                "Verification overrides rejected or failed at the ledger"
            ),
            registry
        )?;

        let unauthorized_requests = register_int_counter_with_registry!(
            Opts::new(
                "faceid_relay_unauthorized_total",
                "Override requests refused for missing or invalid credentials"
            ),
            registry
        )?;

        let ledger_write_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "faceid_relay_ledger_write_ms",
                "Latency of ledger verification writes in milliseconds"
            )
            .buckets(vec![1.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0]),
            registry
        )?;

        Ok(Self {
            registry,
            overrides_accepted,
            overrides_rejected,
            unauthorized_requests,
            ledger_write_ms,
        })
    }

    /// Encode all registered metrics in the Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
