//! 構造化ログユーティリティ。
//! tracing クレートを使用し、JSON またはテキスト形式の構造化ログを出力する。
//!
//! # 使用例
//!
//! ```ignore
//! use tracing::{info, warn};
//!
//! info!(user_id = 42, permission_count = 7, "href permissions resolved");
//! warn!(username = %name, "login rejected");
//! ```

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// fmt_layer は format に応じた出力レイヤーを返す。"text" 以外は JSON。
pub fn fmt_layer<S>(format: &str) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    if format == "text" {
        fmt::layer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed()
    } else {
        fmt::layer()
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed()
    }
}

/// default_filter は環境名からデフォルトのログレベルを決める。
///
/// - dev: debug
/// - staging: info
/// - それ以外: warn
pub fn default_filter(env: &str) -> &'static str {
    match env {
        "dev" => "debug",
        "staging" => "info",
        _ => "warn",
    }
}

/// init_logger は OpenTelemetry を使わずに tracing-subscriber だけを初期化する。
/// CLI ツールやテストハーネス向け。既に初期化済みの場合は何もしない。
pub fn init_logger(env: &str, format: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(default_filter(env)))
        .with(fmt_layer(format))
        .try_init();
}

/// parse_log_level はログレベル文字列を tracing の Level に変換する。
pub fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
