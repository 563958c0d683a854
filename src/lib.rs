//! Review Dashboard - Product Review Analytics
//!
//! A Rust library for turning a CSV export of product reviews into the data
//! behind a small per-country dashboard.
//!
//! # Features
//!
//! - Newline-tolerant CSV loading with skip-and-count for corrupt rows
//! - Text cleaning with stop-word removal
//! - Fail-soft sentiment scoring behind a replaceable model trait
//! - Rating histogram, top words by sentiment, and monthly review trend

/// Chart aggregations
pub mod aggregate;
/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// View export to JSON and CSV
pub mod file_writer;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Text normalization and sentiment scoring
pub mod nlp;
/// Loading and enrichment
pub mod pipeline;
/// Dashboard query service
pub mod service;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use error::{DashboardError, Result};
pub use models::{EnrichedTable, Review, Theme};
pub use nlp::{SentimentModel, SentimentScorer, TextNormalizer};
pub use pipeline::ReviewPipeline;
pub use service::{DashboardService, DashboardView};
