//! Query service over the enriched review table
//!
//! [`DashboardService`] owns the table behind an `Arc` and answers the three
//! chart queries for a selected country, plus the country selector options.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::aggregate::{self, DEFAULT_TOP_WORDS};
use crate::metrics::MetricsCollector;
use crate::models::{EnrichedTable, Review, SentimentWords, Theme, TrendPoint, YearMonth};

/// How the country selector orders its options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountryOrder {
    /// Order of first appearance in the table
    #[default]
    FirstSeen,
    /// Lexicographic order
    Sorted,
}

impl std::str::FromStr for CountryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_seen" => Ok(Self::FirstSeen),
            "sorted" => Ok(Self::Sorted),
            other => Err(format!("unknown country order: {other}")),
        }
    }
}

/// Settings for a [`DashboardService`]
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    /// Words per sentiment list
    pub top_words: usize,
    /// Order of the country selector
    pub country_order: CountryOrder,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            top_words: DEFAULT_TOP_WORDS,
            country_order: CountryOrder::default(),
        }
    }
}

/// Chart titles shown above each view
#[derive(Debug, Clone, Serialize)]
pub struct ChartTitles {
    /// Rating histogram
    pub rating_distribution: &'static str,
    /// Positive word bars
    pub words_positive: &'static str,
    /// Negative word bars
    pub words_negative: &'static str,
    /// Monthly trend line
    pub review_trend: &'static str,
}

const TITLES: ChartTitles = ChartTitles {
    rating_distribution: "Rating Distribution by Country",
    words_positive: "Word Analysis - Positive Sentiment",
    words_negative: "Word Analysis - Negative Sentiment",
    review_trend: "Review Trend Over Time",
};

/// Everything the charts need for one country and theme
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Selected country
    pub country: String,
    /// Selected theme
    pub theme: Theme,
    /// Plotly template name for `theme`
    pub template: &'static str,
    /// Chart headings
    pub titles: ChartTitles,
    /// Review count per star rating
    pub rating_distribution: BTreeMap<u8, usize>,
    /// Top words by sentiment sign
    pub words: SentimentWords,
    /// Review count per month, oldest first
    pub trend: Vec<TrendPoint>,
}

/// Overall shape of the loaded table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Rows in the table
    pub reviews: usize,
    /// Distinct countries
    pub countries: usize,
    /// Reviews scored above zero
    pub positive: usize,
    /// Reviews scored below zero
    pub negative: usize,
    /// Reviews scored exactly zero
    pub neutral: usize,
    /// Reviews with a usable date
    pub dated: usize,
    /// Earliest review month
    pub first_period: Option<YearMonth>,
    /// Latest review month
    pub last_period: Option<YearMonth>,
}

/// Serves chart queries from one shared, read-only table
#[derive(Debug, Clone)]
pub struct DashboardService {
    table: Arc<EnrichedTable>,
    countries: Arc<[String]>,
    options: ServiceOptions,
    metrics: MetricsCollector,
}

impl DashboardService {
    /// Take ownership of `table` and precompute the country options
    pub fn new(table: EnrichedTable, options: ServiceOptions) -> Self {
        let countries = country_options(&table, options.country_order).into();
        Self {
            table: Arc::new(table),
            countries,
            options,
            metrics: MetricsCollector::default(),
        }
    }

    /// Distinct countries present in the table
    #[must_use]
    pub fn country_options(&self) -> &[String] {
        &self.countries
    }

    /// The initially selected country, if the table has any
    #[must_use]
    pub fn default_country(&self) -> Option<&str> {
        self.countries.first().map(String::as_str)
    }

    /// Review count per star rating for `country`
    pub fn rating_distribution(&self, country: &str) -> BTreeMap<u8, usize> {
        let start = Instant::now();
        let result = aggregate::rating_distribution(&self.table, country);
        self.metrics.record_query("rating_distribution", start.elapsed());
        result
    }

    /// Top positive and negative words for `country`
    pub fn sentiment_word_frequency(&self, country: &str) -> SentimentWords {
        let start = Instant::now();
        let result = aggregate::sentiment_word_frequency(&self.table, country, self.options.top_words);
        self.metrics.record_query("word_frequency", start.elapsed());
        result
    }

    /// Monthly review counts for `country`
    pub fn review_trend(&self, country: &str) -> Vec<TrendPoint> {
        let start = Instant::now();
        let result = aggregate::review_trend(&self.table, country);
        self.metrics.record_query("review_trend", start.elapsed());
        result
    }

    /// Counts across the whole table, ignoring the country filter
    #[must_use]
    pub fn summary(&self) -> TableSummary {
        let reviews = self.table.reviews();
        let periods: Vec<YearMonth> = reviews.iter().filter_map(Review::period).collect();

        TableSummary {
            reviews: reviews.len(),
            countries: self.countries.len(),
            positive: reviews.iter().filter(|r| r.sentiment > 0.0).count(),
            negative: reviews.iter().filter(|r| r.sentiment < 0.0).count(),
            neutral: reviews.iter().filter(|r| r.sentiment == 0.0).count(),
            dated: periods.len(),
            first_period: periods.iter().min().copied(),
            last_period: periods.iter().max().copied(),
        }
    }

    /// All three charts for `country` styled with `theme`
    pub fn view(&self, country: &str, theme: Theme) -> DashboardView {
        debug!(country, ?theme, "Building dashboard view");
        DashboardView {
            country: country.to_string(),
            theme,
            template: theme.plotly_template(),
            titles: TITLES,
            rating_distribution: self.rating_distribution(country),
            words: self.sentiment_word_frequency(country),
            trend: self.review_trend(country),
        }
    }
}

/// Distinct non-empty countries in the requested order
#[must_use]
pub fn country_options(table: &EnrichedTable, order: CountryOrder) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut countries: Vec<String> = table
        .reviews()
        .iter()
        .filter_map(|r| r.country.as_deref())
        .filter(|c| seen.insert(*c))
        .map(ToString::to_string)
        .collect();

    if order == CountryOrder::Sorted {
        countries.sort();
    }
    countries
}
