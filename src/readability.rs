//! Readability metrics for song lyrics
//!
//! Pure functions over raw lyric text. Each metric returns a [`MetricError`]
//! instead of dividing by zero when the text has no sentences or no words.

pub mod dictionary;
pub mod tokenize;

pub use dictionary::PronouncingDictionary;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

const VOWELS: &str = "aeiouy";

// Greedy and line-bound: "[Chorus: A] x [B]" loses everything between the outer brackets.
static SECTION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*\]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("text contains no sentences")]
    NoSentences,
    #[error("text contains no words")]
    NoWords,
    #[error("no word of the text is in the pronouncing dictionary")]
    NoDictionaryWords,
}

/// All text metrics stored alongside a song.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub fres: f64,
    pub vocab_complexity: f64,
    pub sentence_length: f64,
    pub avg_syllables: f64,
}

impl TextMetrics {
    pub fn compute(lyrics: &str, dictionary: &PronouncingDictionary) -> Result<Self, MetricError> {
        Ok(Self {
            fres: fres(lyrics)?,
            vocab_complexity: vocab_complexity(lyrics)?,
            sentence_length: sentence_length(lyrics)?,
            avg_syllables: avg_syllables(lyrics, dictionary)?,
        })
    }
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Heuristic syllable count of a single token.
///
/// Counts vowel groups, drops a silent trailing `e` (but not `-le`) and never
/// returns less than one.
pub fn count_syllables(word: &str) -> usize {
    let word = word
        .to_lowercase()
        .trim_matches(|c| matches!(c, '.' | ':' | ';' | '?' | '!'))
        .to_string();
    let chars: Vec<char> = word.chars().collect();

    let mut count: i64 = 0;
    if chars.first().is_some_and(|&c| is_vowel(c)) {
        count += 1;
    }
    for pair in chars.windows(2) {
        if is_vowel(pair[1]) && !is_vowel(pair[0]) {
            count += 1;
        }
    }
    if word.ends_with('e') {
        count -= 1;
    }
    if word.ends_with("le") {
        count += 1;
    }

    count.max(1) as usize
}

/// Remove `[Verse]`, `[Chorus]` and similar annotations.
pub fn strip_section_markers(lyrics: &str) -> String {
    SECTION_MARKER.replace_all(lyrics, "").into_owned()
}

/// Flesch reading-ease score.
///
/// Every non-empty line is one sentence, words are whitespace-delimited.
pub fn fres(lyrics: &str) -> Result<f64, MetricError> {
    let scrubbed = strip_section_markers(lyrics);

    let sentence_count = scrubbed.split('\n').filter(|line| !line.is_empty()).count();
    let words: Vec<&str> = scrubbed.split_whitespace().collect();
    if sentence_count == 0 {
        return Err(MetricError::NoSentences);
    }
    if words.is_empty() {
        return Err(MetricError::NoWords);
    }

    let word_count = words.len() as f64;
    let syllable_count: usize = words.iter().map(|w| count_syllables(w)).sum();

    Ok(206.835
        - 1.015 * (word_count / sentence_count as f64)
        - 84.6 * (syllable_count as f64 / word_count))
}

/// Type-token ratio over lowercase word tokens.
pub fn vocab_complexity(lyrics: &str) -> Result<f64, MetricError> {
    let tokens = tokenize::word_tokens(&lyrics.to_lowercase());
    if tokens.is_empty() {
        return Err(MetricError::NoWords);
    }
    let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    Ok(distinct.len() as f64 / tokens.len() as f64)
}

/// Mean number of word tokens per sentence.
pub fn sentence_length(lyrics: &str) -> Result<f64, MetricError> {
    let sentences = tokenize::sentences(lyrics);
    if sentences.is_empty() {
        return Err(MetricError::NoSentences);
    }
    let total_words: usize = sentences
        .iter()
        .map(|s| tokenize::word_tokens(s).len())
        .sum();
    Ok(total_words as f64 / sentences.len() as f64)
}

/// Mean dictionary syllable count per whitespace-delimited word.
///
/// Words missing from the dictionary count in neither the numerator nor the
/// denominator.
pub fn avg_syllables(lyrics: &str, dictionary: &PronouncingDictionary) -> Result<f64, MetricError> {
    let mut words = 0usize;
    let mut syllables = 0usize;
    let mut seen_any = false;

    for word in lyrics.split_whitespace() {
        seen_any = true;
        if let Some(count) = dictionary.syllables(&word.to_lowercase()) {
            words += 1;
            syllables += count;
        }
    }

    if !seen_any {
        return Err(MetricError::NoWords);
    }
    if words == 0 {
        return Err(MetricError::NoDictionaryWords);
    }
    Ok(syllables as f64 / words as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> PronouncingDictionary {
        PronouncingDictionary::parse(
            "I  AY1\n\
             AM  AE1 M\n\
             HAPPY  HH AE1 P IY0\n\
             BEAUTIFUL  B Y UW1 T AH0 F AH0 L\n",
        )
    }

    #[test]
    fn test_count_syllables_simple_words() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("apple"), 2);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("happy"), 2);
        assert_eq!(count_syllables("I"), 1);
    }

    #[test]
    fn test_count_syllables_strips_punctuation_and_case() {
        assert_eq!(count_syllables("Happy!"), count_syllables("happy"));
        assert_eq!(count_syllables("...apple?"), 2);
    }

    #[test]
    fn test_count_syllables_never_below_one() {
        for word in ["", "e", "the", "rhythm", "brr", "!!!", "ee", "queue"] {
            assert!(count_syllables(word) >= 1, "{:?}", word);
        }
    }

    #[test]
    fn test_fres_ignores_section_markers() {
        let with_marker = fres("[Chorus]\nI am happy").unwrap();
        let without = fres("I am happy").unwrap();
        assert_eq!(with_marker, without);
    }

    #[test]
    fn test_fres_is_deterministic() {
        let text = "We were young\nAnd the night was long\nDancing on the table";
        assert_eq!(fres(text).unwrap(), fres(text).unwrap());
    }

    #[test]
    fn test_fres_value() {
        // 3 words, 1 sentence, 1 + 1 + 2 syllables
        let expected = 206.835 - 1.015 * 3.0 - 84.6 * (4.0 / 3.0);
        assert!((fres("I am happy").unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fres_degenerate_input() {
        assert_eq!(fres(""), Err(MetricError::NoSentences));
        assert_eq!(fres("[Intro]\n[Outro]"), Err(MetricError::NoSentences));
        assert_eq!(fres("   "), Err(MetricError::NoWords));
    }

    #[test]
    fn test_vocab_complexity() {
        // tokens: la la la love -> 2 distinct of 4
        assert!((vocab_complexity("La la la love").unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(vocab_complexity("  \n "), Err(MetricError::NoWords));
    }

    #[test]
    fn test_sentence_length() {
        // "I love you ." and "Do you ?" -> 4 + 3 tokens over 2 sentences
        let value = sentence_length("I love you. Do you?").unwrap();
        assert!((value - 3.5).abs() < 1e-9);
        assert_eq!(sentence_length(""), Err(MetricError::NoSentences));
    }

    #[test]
    fn test_avg_syllables_skips_unknown_words() {
        let dict = dictionary();
        // "zzyzx" is unknown; I(1) am(1) happy(2) -> 4 / 3
        let value = avg_syllables("I am happy zzyzx", &dict).unwrap();
        assert!((value - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_avg_syllables_degenerate_input() {
        let dict = dictionary();
        assert_eq!(avg_syllables("", &dict), Err(MetricError::NoWords));
        assert_eq!(
            avg_syllables("zzyzx qwghlm", &dict),
            Err(MetricError::NoDictionaryWords)
        );
    }

    #[test]
    fn test_text_metrics_compute() {
        let dict = dictionary();
        let metrics = TextMetrics::compute("[Verse]\nI am happy\nBeautiful", &dict).unwrap();
        assert_eq!(metrics.fres, fres("I am happy\nBeautiful").unwrap());
        assert!(metrics.avg_syllables > 1.0);
    }
}
