use axum::{routing::get, Router};
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

use crate::lessons::LessonCatalog;
use crate::verdict::FeedbackTier;

static GLOBAL: Lazy<Metrics> = Lazy::new(Metrics::init);

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and expose a static gauge for the
    /// catalog size. Installed once per process.
    fn init() -> Self {
        // Use default buckets to avoid API differences across crate versions.
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        gauge!("lessons_total").set(LessonCatalog::builtin().len() as f64);

        Self { handle }
    }

    pub fn global() -> &'static Metrics {
        &GLOBAL
    }

    /// Count one evaluated attempt, labeled by tier.
    pub fn record_evaluation(&self, tier: FeedbackTier) {
        counter!("evaluations_total", "tier" => tier.as_str()).increment(1);
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
