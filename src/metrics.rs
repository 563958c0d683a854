use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Metrics collection and management
///
/// Recording goes through the `metrics` facade and is a no-op until the
/// embedding process installs a recorder.
#[derive(Debug, Clone, Copy)]
pub struct MetricsCollector {
    // Enrichment metrics
    pub reviews_enriched_total: &'static str,
    pub rows_skipped_total: &'static str,
    pub enrichment_duration: &'static str,
    pub table_size: &'static str,

    // Sentiment metrics
    pub sentiment_scores: &'static str,
    pub sentiment_fallbacks_total: &'static str,

    // Query metrics
    pub queries_total: &'static str,
    pub query_duration: &'static str,

    // Error metrics
    pub errors_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            reviews_enriched_total: "review_dashboard_reviews_enriched_total",
            rows_skipped_total: "review_dashboard_rows_skipped_total",
            enrichment_duration: "review_dashboard_enrichment_duration_seconds",
            table_size: "review_dashboard_table_size",

            sentiment_scores: "review_dashboard_sentiment_scores",
            sentiment_fallbacks_total: "review_dashboard_sentiment_fallbacks_total",

            queries_total: "review_dashboard_queries_total",
            query_duration: "review_dashboard_query_duration_seconds",

            errors_total: "review_dashboard_errors_total",
        }
    }
}

impl MetricsCollector {
    /// Record a completed enrichment run
    pub fn record_enrichment(&self, rows: usize, skipped: usize, duration: Duration) {
        counter!(self.reviews_enriched_total).increment(rows as u64);
        counter!(self.rows_skipped_total).increment(skipped as u64);
        histogram!(self.enrichment_duration).record(duration.as_secs_f64());
        gauge!(self.table_size).set(rows as f64);
    }

    /// Record one sentiment score
    pub fn record_sentiment(&self, score: f64) {
        histogram!(self.sentiment_scores).record(score);
    }

    /// Record a model failure mapped to a neutral score
    pub fn record_sentiment_fallback(&self) {
        counter!(self.sentiment_fallbacks_total).increment(1);
    }

    /// Record one aggregation query
    pub fn record_query(&self, kind: &str, duration: Duration) {
        counter!(self.queries_total, "kind" => kind.to_owned()).increment(1);
        histogram!(self.query_duration, "kind" => kind.to_owned()).record(duration.as_secs_f64());
    }

    /// Record error metrics
    pub fn record_error(&self, error_type: &str, operation: &str) {
        counter!(
            self.errors_total,
            "type" => error_type.to_owned(),
            "operation" => operation.to_owned()
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_creation() {
        let collector = MetricsCollector::default();
        assert_eq!(collector.queries_total, "review_dashboard_queries_total");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let collector = MetricsCollector::default();
        collector.record_enrichment(5, 1, Duration::from_millis(20));
        collector.record_sentiment(0.5);
        collector.record_sentiment_fallback();
        collector.record_query("trend", Duration::from_micros(50));
        collector.record_error("io", "export");
    }
}
