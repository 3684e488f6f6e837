use metrics_exporter_prometheus::PrometheusHandle;
use moderation_review::workflows::review::{Answer, FormVariant};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_answer(raw: &str) -> Result<Answer, String> {
    raw.parse::<Answer>().map_err(|err| err.to_string())
}

pub(crate) fn parse_variant(raw: &str) -> Result<FormVariant, String> {
    raw.parse::<FormVariant>().map_err(|err| err.to_string())
}
