//! Review loading and enrichment
//!
//! The source file is read with the `csv` crate, so quoted fields may span
//! several lines. Rows the reader cannot decode are skipped and counted;
//! every decoded row survives enrichment, with malformed fields degraded to
//! `None` or neutral defaults.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{EnrichedTable, RawReview, Review};
use crate::nlp::{SentimentScorer, TextNormalizer};

/// Columns the loader refuses to start without
pub const REQUIRED_COLUMNS: [&str; 4] = ["Review Text", "Rating", "Country", "Review Date"];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Rows read from a source file
#[derive(Debug, Clone, Default)]
pub struct RawBatch {
    /// Decoded rows, in file order
    pub rows: Vec<RawReview>,
    /// Rows the reader could not decode
    pub skipped_rows: usize,
}

/// Outcome of loading and enriching a source file
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Enriched rows, in file order
    pub table: EnrichedTable,
    /// Rows the reader could not decode
    pub skipped_rows: usize,
    /// Scores replaced by the neutral fallback
    pub sentiment_fallbacks: usize,
    /// Time spent enriching
    pub duration: Duration,
}

/// Read reviews from any reader
pub fn read_reviews<R: Read>(reader: R, delimiter: u8) -> Result<RawBatch> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::MissingColumn(column.to_string()));
        }
    }

    let mut batch = RawBatch::default();
    for result in csv_reader.deserialize::<RawReview>() {
        match result {
            Ok(row) => batch.rows.push(row),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(csv::Position::line);
                debug!(?line, error = %e, "Skipping corrupt row");
                batch.skipped_rows += 1;
            }
        }
    }

    Ok(batch)
}

/// Read reviews from a file on disk
pub fn load_reviews(path: &Path, delimiter: u8) -> Result<RawBatch> {
    if !path.exists() {
        return Err(DashboardError::SourceNotFound(path.to_path_buf()));
    }

    info!("Reading reviews from {}", path.display());
    let file = File::open(path)?;
    let batch = read_reviews(file, delimiter)?;

    if batch.skipped_rows > 0 {
        warn!(skipped = batch.skipped_rows, "Skipped corrupt rows while reading {}", path.display());
    }
    Ok(batch)
}

/// Parse a review date, accepting the common layouts found in exports
///
/// Returns `None` for blank or unrecognized values.
#[must_use]
pub fn parse_review_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a star rating from values like `5`, `4.0` or `Rated 4 out of 5 stars`
///
/// The first run of digits wins.
#[must_use]
pub fn parse_rating(value: &str) -> Option<u8> {
    value
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| !part.is_empty())?
        .parse()
        .ok()
}

/// Applies normalization and scoring to raw rows
#[derive(Debug, Clone)]
pub struct ReviewPipeline {
    normalizer: TextNormalizer,
    scorer: SentimentScorer,
    metrics: MetricsCollector,
}

impl ReviewPipeline {
    /// Pipeline from explicit parts
    pub fn new(normalizer: TextNormalizer, scorer: SentimentScorer) -> Self {
        Self {
            normalizer,
            scorer,
            metrics: MetricsCollector::default(),
        }
    }

    /// Pipeline with the English stop words and the lexicon model
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(TextNormalizer::new()?, SentimentScorer::lexicon()))
    }

    /// The scorer applied to cleaned text
    #[must_use]
    pub const fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    /// The normalizer producing `cleaned_text`
    #[must_use]
    pub const fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Enrich a single row; never fails
    #[must_use]
    pub fn enrich_record(&self, raw: RawReview) -> Review {
        let text = raw.text.unwrap_or_default();
        let cleaned_text = self.normalizer.normalize(&text);
        let sentiment = self.scorer.score(&cleaned_text);
        let review_date = raw.review_date.as_deref().and_then(parse_review_date);

        Review {
            reviewer_name: raw.reviewer_name,
            title: raw.title,
            rating: raw.rating.as_deref().and_then(parse_rating),
            country: raw
                .country
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            year: review_date.map(|d| d.year()),
            review_date,
            cleaned_text,
            sentiment,
            text,
        }
    }

    /// Enrich every row, preserving input order
    #[must_use]
    pub fn enrich(&self, rows: Vec<RawReview>) -> EnrichedTable {
        let reviews: Vec<Review> = rows.into_iter().map(|raw| self.enrich_record(raw)).collect();

        let undated = reviews.iter().filter(|r| r.review_date.is_none()).count();
        if undated > 0 {
            debug!(undated, "Reviews without a usable date");
        }

        EnrichedTable::new(reviews)
    }

    /// Enrich a batch and report how it went
    #[must_use]
    pub fn run(&self, batch: RawBatch) -> LoadReport {
        let start = Instant::now();
        let fallbacks_before = self.scorer.fallbacks();

        let table = self.enrich(batch.rows);

        let duration = start.elapsed();
        let sentiment_fallbacks = self.scorer.fallbacks() - fallbacks_before;
        self.metrics
            .record_enrichment(table.len(), batch.skipped_rows, duration);

        if sentiment_fallbacks > 0 {
            warn!(sentiment_fallbacks, "Some reviews were scored neutral after model failures");
        }
        info!(
            rows = table.len(),
            skipped = batch.skipped_rows,
            duration_ms = duration.as_millis(),
            "Review table enriched"
        );

        LoadReport {
            table,
            skipped_rows: batch.skipped_rows,
            sentiment_fallbacks,
            duration,
        }
    }
}

/// Run enrichment on the blocking pool, failing if it exceeds `limit`
pub async fn run_bounded(pipeline: ReviewPipeline, batch: RawBatch, limit: Duration) -> Result<LoadReport> {
    let task = tokio::task::spawn_blocking(move || pipeline.run(batch));

    match tokio::time::timeout(limit, task).await {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(e)) => Err(DashboardError::Other(format!("Enrichment task failed: {e}"))),
        Err(_) => {
            MetricsCollector::default().record_error("timeout", "enrich");
            Err(DashboardError::Timeout(limit.as_secs()))
        }
    }
}
