use std::sync::Arc;

use crate::metrics::Metrics;

#[cfg(any(feature = "axum-layer", test))]
mod http_layer;

#[cfg(any(feature = "axum-layer", test))]
pub use http_layer::MetricsLayer;

/// TelemetryMiddleware は HTTP レスポンス完了時のメトリクス記録と構造化ログ出力を担う。
/// MetricsLayer から呼び出される。
#[derive(Clone)]
pub struct TelemetryMiddleware {
    pub metrics: Arc<Metrics>,
}

impl TelemetryMiddleware {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }

    /// on_response はステータスコードとレイテンシを記録し、構造化ログを出力する。
    pub fn on_response(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        self.metrics
            .record_http_request(method, path, &status.to_string());
        self.metrics.record_http_duration(method, path, duration_secs);

        if status >= 500 {
            tracing::error!(
                http.method = method,
                http.path = path,
                http.status_code = status,
                duration_secs = duration_secs,
                "Request failed"
            );
        } else {
            tracing::info!(
                http.method = method,
                http.path = path,
                http.status_code = status,
                duration_secs = duration_secs,
                "Request completed"
            );
        }
    }
}
