//! Integration tests for the dashboard service

mod common;

use common::{review, sample_table};
use review_dashboard::models::{EnrichedTable, Theme, YearMonth};
use review_dashboard::service::{country_options, CountryOrder, DashboardService, ServiceOptions};
use std::thread;

#[test]
fn test_country_options_first_seen() {
    let service = DashboardService::new(sample_table(), ServiceOptions::default());
    assert_eq!(service.country_options(), ["US".to_string(), "GB".to_string()]);
    assert_eq!(service.default_country(), Some("US"));
}

#[test]
fn test_country_options_sorted_skips_missing() {
    let mut anonymous = review("XX", 5, "ok", 0.0, None);
    anonymous.country = None;
    let table = EnrichedTable::new(vec![
        review("US", 5, "ok", 0.0, None),
        anonymous,
        review("DE", 5, "ok", 0.0, None),
        review("US", 4, "ok", 0.0, None),
    ]);

    assert_eq!(country_options(&table, CountryOrder::Sorted), vec!["DE", "US"]);
    assert_eq!(country_options(&table, CountryOrder::FirstSeen), vec!["US", "DE"]);
}

#[test]
fn test_empty_table_has_no_default_country() {
    let service = DashboardService::new(EnrichedTable::default(), ServiceOptions::default());
    assert!(service.country_options().is_empty());
    assert_eq!(service.default_country(), None);
}

#[test]
fn test_view_bundles_all_charts() {
    let service = DashboardService::new(sample_table(), ServiceOptions::default());
    let view = service.view("US", Theme::Dark);

    assert_eq!(view.template, "plotly_dark");
    assert_eq!(view.rating_distribution.values().sum::<usize>(), 4);
    assert_eq!(view.words.positive[0].word, "fast");
    assert_eq!(view.trend.len(), 2);
}

#[test]
fn test_theme_only_changes_template() {
    let service = DashboardService::new(sample_table(), ServiceOptions::default());
    let light = service.view("GB", Theme::Light);
    let dark = service.view("GB", Theme::Dark);

    assert_eq!(light.template, "plotly_white");
    assert_eq!(light.rating_distribution, dark.rating_distribution);
    assert_eq!(light.words, dark.words);
    assert_eq!(light.trend, dark.trend);
}

#[test]
fn test_view_for_unknown_country_is_empty() {
    let service = DashboardService::new(sample_table(), ServiceOptions::default());
    let view = service.view("Atlantis", Theme::Light);

    assert!(view.rating_distribution.is_empty());
    assert!(view.words.positive.is_empty());
    assert!(view.words.negative.is_empty());
    assert!(view.trend.is_empty());
}

#[test]
fn test_top_words_option_is_applied() {
    let options = ServiceOptions {
        top_words: 2,
        ..ServiceOptions::default()
    };
    let service = DashboardService::new(sample_table(), options);
    assert_eq!(service.sentiment_word_frequency("US").positive.len(), 2);
}

#[test]
fn test_summary() {
    let service = DashboardService::new(sample_table(), ServiceOptions::default());
    let summary = service.summary();

    assert_eq!(summary.reviews, 6);
    assert_eq!(summary.countries, 2);
    assert_eq!((summary.positive, summary.negative, summary.neutral), (3, 2, 1));
    assert_eq!(summary.dated, 5);
    assert_eq!(summary.first_period, Some(YearMonth::new(2022, 12)));
    assert_eq!(summary.last_period, Some(YearMonth::new(2023, 3)));
}

#[test]
fn test_clones_serve_queries_from_threads() {
    let service = DashboardService::new(sample_table(), ServiceOptions::default());
    let expected = service.review_trend("US");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = service.clone();
            thread::spawn(move || service.review_trend("US"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), expected);
    }
}

#[test]
fn test_view_serializes_for_rendering() {
    let service = DashboardService::new(sample_table(), ServiceOptions::default());
    let json = serde_json::to_value(service.view("US", Theme::Light)).expect("serialize");

    assert_eq!(json["theme"], "light");
    assert_eq!(json["rating_distribution"]["5"], 2);
    assert_eq!(json["trend"][0]["period"], "2023-01");
    assert_eq!(json["words"]["negative"][0]["word"], "broken");
}
