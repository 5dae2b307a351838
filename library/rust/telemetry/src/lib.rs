pub mod logger;
pub mod metrics;
pub mod middleware;

#[cfg(any(feature = "axum-layer", test))]
pub use middleware::MetricsLayer;


use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// TelemetryConfig は telemetry ライブラリの初期化設定を保持する。
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub version: String,
    pub environment: String,
    pub trace_endpoint: Option<String>,
    pub sample_rate: f64,
    pub log_level: String,
    /// ログ出力フォーマット。"text" の場合はプレーンテキスト、それ以外は JSON。
    pub log_format: String,
}

impl TelemetryConfig {
    /// 環境変数 (ENVIRONMENT / OTEL_EXPORTER_OTLP_ENDPOINT / LOG_LEVEL / LOG_FORMAT) から設定を組み立てる。
    pub fn from_env(service_name: &str, version: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            version: version.to_string(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()),
            trace_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
            sample_rate: 1.0,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
        }
    }
}

/// init_telemetry は OpenTelemetry TracerProvider と tracing-subscriber を初期化する。
/// trace_endpoint が指定されている場合のみ OTLP gRPC エクスポータを設定する。
pub fn init_telemetry(cfg: &TelemetryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tracer = match cfg.trace_endpoint {
        Some(ref endpoint) => {
            let exporter = SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .build()?;
            let provider = sdktrace::TracerProvider::builder()
                .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
                .with_sampler(sdktrace::Sampler::TraceIdRatioBased(cfg.sample_rate))
                .with_resource(Resource::new(vec![
                    KeyValue::new("service.name", cfg.service_name.clone()),
                    KeyValue::new("service.version", cfg.version.clone()),
                    KeyValue::new("environment", cfg.environment.clone()),
                ]))
                .build();
            let tracer = provider.tracer("keep");
            global::set_tracer_provider(provider);
            Some(tracer)
        }
        None => None,
    };

    let otel_layer = tracer.map(|t| tracing_opentelemetry::layer().with_tracer(t));

    tracing_subscriber::registry()
        .with(EnvFilter::new(&cfg.log_level))
        .with(logger::fmt_layer(&cfg.log_format))
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

/// shutdown は OpenTelemetry TracerProvider をシャットダウンし、未送信のスパンをフラッシュする。
pub fn shutdown() {
    global::shutdown_tracer_provider();
}
