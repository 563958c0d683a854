//! Read-only chart queries over the enriched table
//!
//! Each query filters to one country by exact match first. A country with
//! no reviews produces empty results, never an error.

use std::collections::{BTreeMap, HashMap};

use crate::models::{EnrichedTable, Review, SentimentWords, TrendPoint, WordCount, YearMonth};

/// Default length of the word-frequency lists
pub const DEFAULT_TOP_WORDS: usize = 10;

/// Number of reviews per distinct rating value
///
/// Reviews without a readable rating are not counted.
#[must_use]
pub fn rating_distribution(table: &EnrichedTable, country: &str) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for rating in table.for_country(country).filter_map(|r| r.rating) {
        *counts.entry(rating).or_insert(0) += 1;
    }
    counts
}

/// Most frequent words in positive and negative reviews
///
/// Reviews scoring exactly 0.0 belong to neither side.
#[must_use]
pub fn sentiment_word_frequency(table: &EnrichedTable, country: &str, top_n: usize) -> SentimentWords {
    let (positive, negative): (Vec<&Review>, Vec<&Review>) = table
        .for_country(country)
        .filter(|r| r.sentiment != 0.0)
        .partition(|r| r.sentiment > 0.0);

    SentimentWords {
        positive: top_words(positive.iter().map(|r| r.cleaned_text.as_str()), top_n),
        negative: top_words(negative.iter().map(|r| r.cleaned_text.as_str()), top_n),
    }
}

/// Count whitespace-separated tokens and keep the `top_n` most frequent
///
/// Equal counts keep first-occurrence order.
pub fn top_words<'a, I>(texts: I, top_n: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    // word -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut position = 0;
    for word in texts.into_iter().flat_map(str::split_whitespace) {
        counts.entry(word).or_insert((0, position)).0 += 1;
        position += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(word, count, _)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}

/// Reviews per calendar month, oldest first
///
/// Only months with at least one dated review appear.
#[must_use]
pub fn review_trend(table: &EnrichedTable, country: &str) -> Vec<TrendPoint> {
    let mut months: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for period in table.for_country(country).filter_map(Review::period) {
        *months.entry(period).or_insert(0) += 1;
    }

    months
        .into_iter()
        .map(|(period, count)| TrendPoint { period, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_words_tie_break_is_first_seen() {
        let words = top_words(["pear apple", "apple pear", "kiwi"], 10);
        let ranked: Vec<(&str, usize)> = words.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(ranked, vec![("pear", 2), ("apple", 2), ("kiwi", 1)]);
    }

    #[test]
    fn test_top_words_truncates() {
        let text = "a b c d e f g h i j k l";
        assert_eq!(top_words([text], DEFAULT_TOP_WORDS).len(), 10);
        assert!(top_words([text], 0).is_empty());
    }

    #[test]
    fn test_top_words_empty_input() {
        assert!(top_words(["", "   "], 10).is_empty());
    }
}
