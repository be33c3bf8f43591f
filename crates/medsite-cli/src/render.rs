//! Plain-text rendering of validation results

use std::fmt::Write;

use medsite_content::{ContentReport, QualityAssessment, Suggestion, ValidationResult};

/// Render a full-tree report
pub(crate) fn report(label: &str, specialty: &str, report: &ContentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {label} ({specialty}) ==");
    let _ = writeln!(out, "Status: {}", status(report.is_valid));

    if !report.errors.is_empty() {
        let _ = writeln!(out, "Errors:");
        for (key, errors) in &report.errors {
            for error in errors {
                let _ = writeln!(out, "  [{key}] {error}");
            }
        }
    }

    list(&mut out, "Warnings", &report.warnings);
    suggestions(&mut out, &report.suggestions);

    if !report.medical.is_clean() {
        let _ = writeln!(out, "Medical content:");
        out.push_str(&indent(&result(&report.medical)));
    }

    out.push_str(&quality(&report.quality));
    out
}

/// Render a single-check result
pub(crate) fn result(result: &ValidationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status: {}", status(result.is_valid));
    list(&mut out, "Errors", &result.errors);
    list(&mut out, "Warnings", &result.warnings);
    suggestions(&mut out, &result.suggestions);
    out
}

/// Render a quality assessment
pub(crate) fn quality(quality: &QualityAssessment) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Quality: overall {} (readability {}, seo {}, medical {})",
        quality.overall_score, quality.readability_score, quality.seo_score, quality.medical_score
    );
    if let Some(m) = &quality.metrics {
        let _ = writeln!(
            out,
            "  {} words, {} sentences, {:.1} words/sentence, {:.2} syllables/word, {} medical keywords",
            m.word_count,
            m.sentence_count,
            m.avg_words_per_sentence,
            m.avg_syllables_per_word,
            m.medical_keyword_count
        );
    }
    list(&mut out, "Quality suggestions", &quality.suggestions);
    out
}

fn status(valid: bool) -> &'static str {
    if valid {
        "VALID"
    } else {
        "INVALID"
    }
}

fn list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

fn suggestions(out: &mut String, items: &[Suggestion]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "Suggestions:");
    for item in items {
        match item {
            Suggestion::Text(text) => {
                let _ = writeln!(out, "  - {text}");
            }
            Suggestion::Structured {
                section,
                message,
                suggestion,
                ..
            } => {
                let _ = writeln!(out, "  - [{section}] {message}: {suggestion}");
            }
        }
    }
}

fn indent(text: &str) -> String {
    text.lines().map(|l| format!("  {l}\n")).collect()
}
