use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::{Arc, OnceLock};
use tracing::info;

static METRICS_INSTANCE: OnceLock<Arc<Metrics>> = OnceLock::new();

/// Lazily initializes and returns the process-wide `Metrics`.
pub fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| {
        info!("Initializing Metrics ...");
        Metrics::new()
    })
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Signing
    pub sas_tokens_signed: IntCounter,

    // Provisioning
    pub devices_provisioned: IntCounterVec,
    pub provisioning_failures: IntCounterVec,
    pub teardown_failures: IntCounterVec,

    // Registry
    pub registry_request_duration: HistogramVec,
}

impl Metrics {
    fn new() -> Arc<Self> {
        // names and labels are static, construction cannot fail
        let registry = Registry::new_custom(Some("iothubaccount".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            sas_tokens_signed: IntCounter::new("sas_tokens_signed_total", "Shared access tokens signed").unwrap(),

            devices_provisioned: IntCounterVec::new(Opts::new("devices_provisioned_total", "Devices created in the registry"), &["auth_method"]).unwrap(),
            provisioning_failures: IntCounterVec::new(Opts::new("provisioning_failures_total", "Provisioning failures by stage"), &["auth_method", "stage"]).unwrap(),
            teardown_failures: IntCounterVec::new(Opts::new("teardown_failures_total", "Device deletions that failed"), &["auth_method"]).unwrap(),

            registry_request_duration: HistogramVec::new(HistogramOpts::new("registry_request_duration_seconds", "Registry request duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]), &["operation"]).unwrap(),

            registry,
        });

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.sas_tokens_signed.clone())).unwrap();
        reg.register(Box::new(metrics.devices_provisioned.clone())).unwrap();
        reg.register(Box::new(metrics.provisioning_failures.clone())).unwrap();
        reg.register(Box::new(metrics.teardown_failures.clone())).unwrap();
        reg.register(Box::new(metrics.registry_request_duration.clone())).unwrap();

        metrics
    }

    /// Render every registered metric in the text exposition format.
    pub fn gather_text(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
