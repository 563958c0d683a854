//! Data models for review loading, enrichment and aggregation
//!
//! This module contains the record types flowing through the pipeline and
//! the small result shapes handed to the rendering side.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One row of the source file as read from disk
///
/// Every field is optional: the loader never rejects a row because a single
/// column is empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReview {
    /// Name shown for the reviewer
    #[serde(rename = "Reviewer Name", default)]
    pub reviewer_name: Option<String>,
    /// Headline of the review
    #[serde(rename = "Review Title", default)]
    pub title: Option<String>,
    /// Free-form review body
    #[serde(rename = "Review Text", default)]
    pub text: Option<String>,
    /// Star rating as written in the file
    #[serde(rename = "Rating", default)]
    pub rating: Option<String>,
    /// Reviewer country
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    /// Review date as written in the file
    #[serde(rename = "Review Date", default)]
    pub review_date: Option<String>,
}

/// A review after enrichment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    /// Name shown for the reviewer
    pub reviewer_name: Option<String>,
    /// Headline of the review
    pub title: Option<String>,
    /// Original review body, empty when missing
    pub text: String,
    /// Star rating, `None` when the field could not be read
    pub rating: Option<u8>,
    /// Reviewer country, `None` when blank
    pub country: Option<String>,
    /// Parsed review date
    pub review_date: Option<NaiveDateTime>,
    /// Normalized text (lowercase, no punctuation, digits or stop words)
    pub cleaned_text: String,
    /// Polarity in [-1.0, 1.0]
    pub sentiment: f64,
    /// Calendar year of `review_date`
    pub year: Option<i32>,
}

impl Review {
    /// Whether this review belongs to `country` (exact match)
    #[must_use]
    pub fn is_from(&self, country: &str) -> bool {
        self.country.as_deref() == Some(country)
    }

    /// Month bucket of the review date, if any
    #[must_use]
    pub fn period(&self) -> Option<YearMonth> {
        self.review_date.map(|d| YearMonth::new(d.year(), d.month()))
    }
}

/// The enriched review table
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedTable {
    reviews: Vec<Review>,
}

impl EnrichedTable {
    /// Wrap enriched reviews, keeping their order
    #[must_use]
    pub const fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    /// All reviews in file order
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Number of reviews
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Reviews for one country, in table order
    pub fn for_country<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a Review> + 'a {
        self.reviews.iter().filter(move |r| r.is_from(country))
    }
}

/// A calendar month, ordered chronologically and rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Calendar year
    pub year: i32,
    /// Month, 1 to 12
    pub month: u32,
}

impl YearMonth {
    /// Month bucket for `year` and `month`
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Number of reviews in one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Month bucket
    pub period: YearMonth,
    /// Reviews dated in that month
    pub count: usize,
}

/// A word and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// Cleaned token
    pub word: String,
    /// Occurrences across the selected reviews
    pub count: usize,
}

/// Most frequent words split by sentiment sign
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentWords {
    /// Top words from reviews scored above zero
    pub positive: Vec<WordCount>,
    /// Top words from reviews scored below zero
    pub negative: Vec<WordCount>,
}

/// Chart styling selected by the light/dark toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// `plotly_white`
    #[default]
    Light,
    /// `plotly_dark`
    Dark,
}

impl Theme {
    /// Map the theme switch value (`true` is the light position)
    #[must_use]
    pub const fn from_switch(light: bool) -> Self {
        if light {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// Template key passed to the plotting side
    #[must_use]
    pub const fn plotly_template(self) -> &'static str {
        match self {
            Self::Light => "plotly_white",
            Self::Dark => "plotly_dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Output format for exported views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON document per view
    Json,
    /// One CSV file per chart
    Csv,
}

impl OutputFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_year_month_display_and_order() {
        let jan = YearMonth::new(2023, 1);
        let dec = YearMonth::new(2022, 12);
        assert_eq!(jan.to_string(), "2023-01");
        assert!(dec < jan);
    }

    #[test]
    fn test_trend_point_serializes_period_as_string() {
        let point = TrendPoint { period: YearMonth::new(2023, 2), count: 1 };
        let json = serde_json::to_string(&point).expect("serialize");
        assert_eq!(json, r#"{"period":"2023-02","count":1}"#);
    }

    #[test]
    fn test_review_period() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 3)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("valid date");
        let review = Review {
            reviewer_name: None,
            title: None,
            text: String::new(),
            rating: Some(5),
            country: Some("US".to_string()),
            review_date: Some(date),
            cleaned_text: String::new(),
            sentiment: 0.0,
            year: Some(2024),
        };
        assert_eq!(review.period(), Some(YearMonth::new(2024, 7)));
        assert!(review.is_from("US"));
        assert!(!review.is_from("us"));
    }

    #[test]
    fn test_theme_switch() {
        assert_eq!(Theme::from_switch(true).plotly_template(), "plotly_white");
        assert_eq!(Theme::from_switch(false).plotly_template(), "plotly_dark");
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
