//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use review_dashboard::models::{EnrichedTable, Review};

/// Midnight on the given day
pub fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

/// A review with the fields the aggregations look at
pub fn review(country: &str, rating: u8, cleaned: &str, sentiment: f64, when: Option<NaiveDateTime>) -> Review {
    Review {
        reviewer_name: None,
        title: None,
        text: cleaned.to_string(),
        rating: Some(rating),
        country: Some(country.to_string()),
        review_date: when,
        cleaned_text: cleaned.to_string(),
        sentiment,
        year: when.map(|d| d.year()),
    }
}

/// Four US reviews and two from GB
pub fn sample_table() -> EnrichedTable {
    EnrichedTable::new(vec![
        review("US", 5, "fast delivery great price", 0.8, Some(date(2023, 1, 4))),
        review("US", 5, "great charger fast", 0.6, Some(date(2023, 1, 20))),
        review("GB", 4, "decent cable", 0.2, Some(date(2022, 12, 1))),
        review("US", 3, "arrived box", 0.0, Some(date(2023, 2, 2))),
        review("US", 1, "broken charger refund", -0.5, None),
        review("GB", 2, "slow courier", -0.3, Some(date(2023, 3, 9))),
    ])
}
