//! Text normalization and sentiment scoring
//!
//! [`TextNormalizer`] turns a raw review body into the space-separated token
//! string the charts count. Sentiment goes through the [`SentimentModel`]
//! trait so the lexicon can be swapped; [`SentimentScorer`] wraps any model
//! and never lets a failure escape.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stop_words::{get, LANGUAGE};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::{DashboardError, Result};
use crate::metrics::MetricsCollector;

/// Cleans review text for frequency analysis
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    non_word_regex: Regex,
    digits_regex: Regex,
    stopwords: HashSet<String>,
}

impl TextNormalizer {
    /// Create a normalizer with the NLTK English stop-word list
    ///
    /// The NLTK list is short and keeps opinion words such as "good" and
    /// "never"; the ISO list drops them.
    pub fn new() -> Result<Self> {
        Self::with_stop_words(get(LANGUAGE::English))
    }

    /// Create a normalizer with a caller-supplied stop-word set
    ///
    /// Entries are compared case-insensitively.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let non_word_regex = Regex::new(r"[^\w\s]")
            .map_err(|e| DashboardError::Other(format!("Failed to compile punctuation regex: {e}")))?;
        let digits_regex = Regex::new(r"\d+")
            .map_err(|e| DashboardError::Other(format!("Failed to compile digits regex: {e}")))?;

        let stopwords = stop_words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();

        Ok(Self {
            non_word_regex,
            digits_regex,
            stopwords,
        })
    }

    /// Whether `word` is dropped by this normalizer
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Strip punctuation and digits, lowercase, and drop stop words
    ///
    /// Always returns a string; input made only of punctuation or digits
    /// yields `""`.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let composed = raw.nfc().collect::<String>();
        let no_punct = self.non_word_regex.replace_all(&composed, "");
        let no_digits = self.digits_regex.replace_all(&no_punct, "");

        no_digits
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|token| !self.stopwords.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A polarity model mapping text to a score in [-1.0, 1.0]
#[cfg_attr(test, mockall::automock)]
pub trait SentimentModel: Send + Sync {
    /// Polarity of `text`; negative is negative tone, 0.0 is neutral
    fn polarity(&self, text: &str) -> Result<f64>;
}

/// Weighted word lexicon with intensifiers and negation
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    weights: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentiment {
    /// The built-in English lexicon
    #[must_use]
    pub fn new() -> Self {
        let positive_words = [
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 1.0),
            ("amazing", 0.6),
            ("wonderful", 1.0),
            ("fantastic", 0.4),
            ("happy", 0.8),
            ("love", 0.5),
            ("loved", 0.7),
            ("best", 1.0),
            ("awesome", 1.0),
            ("perfect", 1.0),
            ("brilliant", 0.9),
            ("outstanding", 0.5),
            ("superb", 1.0),
            ("pleased", 0.5),
            ("satisfied", 0.5),
            ("recommend", 0.4),
            ("recommended", 0.4),
            ("fast", 0.2),
            ("quick", 0.33),
            ("easy", 0.43),
            ("helpful", 0.5),
            ("friendly", 0.38),
            ("reliable", 0.5),
            ("nice", 0.6),
            ("fine", 0.42),
            ("quality", 0.3),
            ("works", 0.2),
            ("smooth", 0.4),
            ("cheap", 0.4),
            ("glad", 0.5),
        ];

        let negative_words = [
            ("bad", -0.7),
            ("terrible", -1.0),
            ("awful", -1.0),
            ("horrible", -1.0),
            ("worst", -1.0),
            ("hate", -0.8),
            ("poor", -0.4),
            ("disappointing", -0.6),
            ("disappointed", -0.75),
            ("useless", -0.5),
            ("worthless", -0.8),
            ("broken", -0.4),
            ("damaged", -0.5),
            ("defective", -0.6),
            ("late", -0.3),
            ("slow", -0.3),
            ("rude", -0.3),
            ("scam", -0.8),
            ("fraud", -0.8),
            ("refund", -0.2),
            ("never", -0.2),
            ("missing", -0.2),
            ("wrong", -0.5),
            ("fake", -0.5),
            ("angry", -0.5),
            ("frustrating", -0.4),
            ("frustrated", -0.7),
            ("annoying", -0.8),
            ("expensive", -0.5),
            ("waste", -0.2),
            ("unhelpful", -0.5),
            ("cancelled", -0.3),
        ];

        let intensifiers = [
            ("very", 1.3),
            ("extremely", 1.5),
            ("incredibly", 1.5),
            ("absolutely", 1.5),
            ("completely", 1.4),
            ("totally", 1.4),
            ("really", 1.2),
            ("so", 1.2),
            ("quite", 1.1),
            ("somewhat", 0.8),
            ("slightly", 0.7),
            ("barely", 0.5),
            ("hardly", 0.5),
        ];

        let negations = ["not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "dont", "didnt", "isnt", "wasnt"];

        Self {
            weights: positive_words.into_iter().chain(negative_words).collect(),
            intensifiers: intensifiers.into_iter().collect(),
            negations: negations.into_iter().collect(),
        }
    }

    fn word_score(&self, words: &[String], i: usize) -> Option<f64> {
        let mut sentiment = *self.weights.get(words[i].as_str())?;

        if i > 0 {
            if let Some(intensity) = self.intensifiers.get(words[i - 1].as_str()) {
                sentiment *= intensity;
            }
        }

        let negated = (1..=2).any(|k| i >= k && self.negations.contains(words[i - k].as_str()));
        if negated {
            sentiment = -sentiment * 0.5;
        }

        Some(sentiment)
    }
}

impl SentimentModel for LexiconSentiment {
    fn polarity(&self, text: &str) -> Result<f64> {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .collect();

        let scores: Vec<f64> = (0..words.len()).filter_map(|i| self.word_score(&words, i)).collect();

        if scores.is_empty() {
            return Ok(0.0);
        }

        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        Ok(average.clamp(-1.0, 1.0))
    }
}

/// Fail-soft wrapper around a [`SentimentModel`]
///
/// Model errors and non-finite results become 0.0; finite results are
/// clamped to [-1.0, 1.0]. The number of fallbacks is tracked so callers can
/// report it.
#[derive(Clone)]
pub struct SentimentScorer {
    model: Arc<dyn SentimentModel>,
    enabled: bool,
    fallbacks: Arc<AtomicUsize>,
    metrics: MetricsCollector,
}

impl SentimentScorer {
    /// Wrap `model`; scoring starts enabled
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self {
            model,
            enabled: true,
            fallbacks: Arc::new(AtomicUsize::new(0)),
            metrics: MetricsCollector::default(),
        }
    }

    /// A scorer backed by [`LexiconSentiment`]
    #[must_use]
    pub fn lexicon() -> Self {
        Self::new(Arc::new(LexiconSentiment::new()))
    }

    /// Turn scoring on or off; a disabled scorer returns 0.0 for everything
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Polarity of `text` in [-1.0, 1.0], never failing
    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        if !self.enabled {
            return 0.0;
        }

        let score = match self.model.polarity(text) {
            Ok(value) if value.is_finite() => value.clamp(-1.0, 1.0),
            Ok(value) => {
                debug!(value, "Sentiment model returned a non-finite score");
                self.fall_back()
            }
            Err(e) => {
                debug!(error = %e, "Sentiment model failed");
                self.fall_back()
            }
        };

        self.metrics.record_sentiment(score);
        score
    }

    /// How many scores were replaced by the neutral fallback so far
    #[must_use]
    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    fn fall_back(&self) -> f64 {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
        self.metrics.record_sentiment_fallback();
        0.0
    }
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer")
            .field("enabled", &self.enabled)
            .field("fallbacks", &self.fallbacks())
            .finish_non_exhaustive()
    }
}
