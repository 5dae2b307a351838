use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Metrics は Prometheus メトリクスのヘルパー構造体である。
/// HTTP の RED メトリクスに加え、DB クエリ・キャッシュ・権限解決のメトリクスを提供する。
pub struct Metrics {
    http_requests_total: CounterVec,
    http_request_duration: HistogramVec,
    db_query_duration: HistogramVec,
    cache_hits_total: IntCounterVec,
    cache_misses_total: IntCounterVec,
    permission_resolutions_total: IntCounterVec,
    registry: Registry,
}

const DEFAULT_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

impl Metrics {
    /// new は Prometheus メトリクスを初期化して返す。
    /// service_name はメトリクスの service ラベルに使用される。
    ///
    /// # Panics
    /// メトリクス名の重複など、レジストリ登録に失敗した場合（プログラムの誤り）にパニックする。
    pub fn new(service_name: &str) -> Self {
        Self::try_new(service_name).expect("failed to register prometheus metrics")
    }

    /// try_new はレジストリ登録エラーを呼び出し元に返す版の new。
    pub fn try_new(service_name: &str) -> prometheus::Result<Self> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests")
                .const_label("service", service_name),
            &["method", "path", "status"],
        )?;
        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Histogram of HTTP request latency",
            )
            .const_label("service", service_name)
            .buckets(DEFAULT_BUCKETS.to_vec()),
            &["method", "path"],
        )?;
        let db_query_duration = HistogramVec::new(
            HistogramOpts::new(
                "db_query_duration_seconds",
                "Histogram of database query latency",
            )
            .const_label("service", service_name)
            .buckets(DEFAULT_BUCKETS.to_vec()),
            &["query_name", "table"],
        )?;
        let cache_hits_total = IntCounterVec::new(
            Opts::new("cache_hits_total", "Total number of cache hits")
                .const_label("service", service_name),
            &["cache_name"],
        )?;
        let cache_misses_total = IntCounterVec::new(
            Opts::new("cache_misses_total", "Total number of cache misses")
                .const_label("service", service_name),
            &["cache_name"],
        )?;
        let permission_resolutions_total = IntCounterVec::new(
            Opts::new(
                "href_permission_resolutions_total",
                "Total number of href permission sets computed from storage",
            )
            .const_label("service", service_name),
            &["scope"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;
        registry.register(Box::new(db_query_duration.clone()))?;
        registry.register(Box::new(cache_hits_total.clone()))?;
        registry.register(Box::new(cache_misses_total.clone()))?;
        registry.register(Box::new(permission_resolutions_total.clone()))?;

        Ok(Self {
            http_requests_total,
            http_request_duration,
            db_query_duration,
            cache_hits_total,
            cache_misses_total,
            permission_resolutions_total,
            registry,
        })
    }

    /// record_http_request は HTTP リクエストカウンタをインクリメントする。
    pub fn record_http_request(&self, method: &str, path: &str, status: &str) {
        self.http_requests_total
            .with_label_values(&[method, path, status])
            .inc();
    }

    /// record_http_duration は HTTP リクエストのレイテンシをヒストグラムに記録する。
    pub fn record_http_duration(&self, method: &str, path: &str, duration_secs: f64) {
        self.http_request_duration
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }

    /// record_db_query_duration は DB クエリのレイテンシをヒストグラムに記録する。
    pub fn record_db_query_duration(&self, query_name: &str, table: &str, duration_secs: f64) {
        self.db_query_duration
            .with_label_values(&[query_name, table])
            .observe(duration_secs);
    }

    pub fn record_cache_hit(&self, cache_name: &str) {
        self.cache_hits_total.with_label_values(&[cache_name]).inc();
    }

    pub fn record_cache_miss(&self, cache_name: &str) {
        self.cache_misses_total.with_label_values(&[cache_name]).inc();
    }

    /// record_permission_resolution はストレージから権限セットを計算した回数を記録する。
    /// scope は "user" または "all"。
    pub fn record_permission_resolution(&self, scope: &str) {
        self.permission_resolutions_total
            .with_label_values(&[scope])
            .inc();
    }

    /// gather_metrics は Prometheus テキストフォーマットでメトリクスを返す。
    /// /metrics エンドポイントのハンドラで使用する。
    pub fn gather_metrics(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::warn!(error = %e, "failed to encode prometheus metrics");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
