//! Heuristic quality scoring
//!
//! Readability, SEO and medical-relevance scores for plain text. Each
//! score starts at 100 and loses a fixed deduction per threshold
//! crossed; thresholds come from [`QualityThresholds`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::QualityThresholds;
use crate::result::{QualityAssessment, QualityMetrics};
use crate::rules::{contains_phrase, KeywordTable};

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static VOWEL_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouyàáâãäåæèéêëìíîïòóôõöøœùúûüýÿ]+").unwrap());

const MAX_SCORE: i64 = 100;

/// Sentence, word and syllable counts for a block of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Non-empty sentences
    pub sentences: usize,
    /// Whitespace-separated words
    pub words: usize,
    /// Estimated syllables over all words
    pub syllables: usize,
}

impl TextStats {
    /// Tokenize and count
    #[must_use]
    pub fn analyze(text: &str) -> Self {
        let sentences = SENTENCE_BREAK
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count();

        let (words, syllables) = text
            .split_whitespace()
            .fold((0, 0), |(w, s), word| (w + 1, s + estimate_syllables(word)));

        Self {
            sentences,
            words,
            syllables,
        }
    }

    /// Words per sentence; text without terminators counts as one sentence
    #[must_use]
    pub fn avg_words_per_sentence(&self) -> f64 {
        ratio(self.words, self.sentences.max(1))
    }

    /// Syllables per word
    #[must_use]
    pub fn avg_syllables_per_word(&self) -> f64 {
        ratio(self.syllables, self.words.max(1))
    }
}

/// Estimate syllables in one word
///
/// Counts vowel groups (`y` included) after dropping non-letters, minus
/// one for a trailing silent `e`, never below 1.
#[must_use]
pub fn estimate_syllables(word: &str) -> usize {
    let letters: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    let mut count = VOWEL_GROUP.find_iter(&letters).count();
    if letters.ends_with('e') {
        count = count.saturating_sub(1);
    }
    count.max(1)
}

/// Score readability, SEO and medical relevance of `text`
///
/// Blank text scores zero everywhere with no metrics.
#[must_use]
pub fn assess_content_quality(
    keywords: &KeywordTable,
    thresholds: &QualityThresholds,
    text: &str,
) -> QualityAssessment {
    if text.trim().is_empty() {
        return QualityAssessment::empty();
    }

    let stats = TextStats::analyze(text);
    let mut suggestions = Vec::new();

    let avg_words = stats.avg_words_per_sentence();
    let avg_syllables = stats.avg_syllables_per_word();

    let mut readability = MAX_SCORE;
    if avg_words > thresholds.max_words_per_sentence {
        readability -= i64::from(thresholds.long_sentence_penalty);
        suggestions.push("Consider breaking up long sentences for better readability".to_string());
    }
    if avg_syllables > thresholds.max_syllables_per_word {
        readability -= i64::from(thresholds.complex_word_penalty);
        suggestions.push("Use simpler words where possible to improve patient understanding".to_string());
    }

    let mut seo = MAX_SCORE;
    if stats.words < thresholds.min_word_count {
        seo -= i64::from(thresholds.thin_content_penalty);
        suggestions.push(format!(
            "Add more content (at least {} words) for better search engine visibility",
            thresholds.min_word_count
        ));
    }
    if stats.words > thresholds.max_word_count {
        seo -= i64::from(thresholds.long_content_penalty);
        suggestions.push("Consider breaking long content into sections with headings".to_string());
    }

    let lowered = text.to_lowercase();
    let keyword_hits = keywords
        .all_keywords()
        .filter(|k| contains_phrase(&lowered, k))
        .count();

    let mut medical = MAX_SCORE;
    if keyword_hits == 0 {
        medical -= i64::from(thresholds.missing_keywords_penalty);
        suggestions.push("Include relevant medical terminology to establish expertise".to_string());
    }

    let readability_score = clamp_score(readability);
    let seo_score = clamp_score(seo);
    let medical_score = clamp_score(medical);

    let mean = (f64::from(readability_score) + f64::from(seo_score) + f64::from(medical_score)) / 3.0;
    let overall_score = clamp_score(mean.round() as i64);

    QualityAssessment {
        readability_score,
        seo_score,
        medical_score,
        overall_score,
        metrics: Some(QualityMetrics {
            word_count: stats.words,
            sentence_count: stats.sentences,
            syllable_count: stats.syllables,
            avg_words_per_sentence: avg_words,
            avg_syllables_per_word: avg_syllables,
            medical_keyword_count: keyword_hits,
        }),
        suggestions,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(score: i64) -> u8 {
    score.clamp(0, MAX_SCORE) as u8
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(text: &str) -> QualityAssessment {
        assess_content_quality(&KeywordTable::standard(), &QualityThresholds::default(), text)
    }

    #[test]
    fn syllable_estimates() {
        assert_eq!(estimate_syllables("cat"), 1);
        assert_eq!(estimate_syllables("care"), 1);
        assert_eq!(estimate_syllables("the"), 1);
        assert_eq!(estimate_syllables("patient"), 2);
        assert_eq!(estimate_syllables("cardiology"), 4);
        assert_eq!(estimate_syllables("123"), 1);
    }

    #[test]
    fn accented_letters_are_kept() {
        assert_eq!(estimate_syllables("café"), 2);
        assert_eq!(estimate_syllables("Résumé"), 3);
        assert_eq!(estimate_syllables("naïve,"), estimate_syllables("naïve"));
    }

    #[test]
    fn tokenizes_sentences_on_terminator_runs() {
        let stats = TextStats::analyze("One two. Three!!! Four? ");
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.words, 4);
    }

    #[test]
    fn blank_text_scores_zero() {
        let result = assess("  \n ");
        assert_eq!(result, QualityAssessment::empty());
    }

    #[test]
    fn short_medical_text_loses_seo_points_only() {
        let result = assess("Our doctor cares for every patient. Call us today.");
        assert_eq!(result.readability_score, 100);
        assert_eq!(result.seo_score, 70);
        assert_eq!(result.medical_score, 100);
        assert_eq!(result.overall_score, 90);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn text_without_keywords_loses_medical_points() {
        let result = assess("The weather is nice. We like it.");
        assert_eq!(result.medical_score, 50);
        assert_eq!(result.metrics.unwrap().medical_keyword_count, 0);
        // (100 + 70 + 50) / 3 = 73.33
        assert_eq!(result.overall_score, 73);
    }

    #[test]
    fn run_on_sentence_is_flagged() {
        let sentence = "our clinic sees a patient and then another patient and then one more patient and the day goes on and on";
        let result = assess(sentence);
        assert_eq!(result.readability_score, 80);
        assert!(result.suggestions[0].contains("long sentences"));
    }

    #[test]
    fn complex_vocabulary_is_flagged() {
        // 4 + 4 + 4 syllables over 3 words
        let result = assess("Comprehensive cardiology evaluation.");
        assert_eq!(result.readability_score, 85);
        assert!(result.metrics.unwrap().avg_syllables_per_word > 1.7);
        assert_eq!(
            result.suggestions[0],
            "Use simpler words where possible to improve patient understanding"
        );
    }

    #[test]
    fn penalties_never_push_scores_below_zero() {
        let thresholds = QualityThresholds {
            thin_content_penalty: 500,
            ..QualityThresholds::default()
        };
        let result = assess_content_quality(&KeywordTable::standard(), &thresholds, "Hello there.");
        assert_eq!(result.seo_score, 0);
        assert!(result.overall_score <= 100);
    }
}
