//! Normalization of typed answers before they are compared to the catalog.

use crate::WordEntry;

/// Normalize a typed answer for grading.
///
/// - Folds typographic quote and dash variants to their ASCII forms
/// - Lowercases
/// - Drops punctuation other than apostrophes and hyphens
/// - Trims and collapses runs of whitespace
pub fn normalize_answer(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{2032}' | '\u{02BC}' | '`' | '\u{00B4}' => {
                '\''
            }
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            c if c.is_ascii_punctuation() && c != '\'' && c != '-' => ' ',
            c => c,
        })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accepted spellings of a word: the bare English form, and the
/// article-prefixed form when the word takes an article.
pub fn accepted_answers(word: &WordEntry) -> Vec<String> {
    let mut answers = vec![normalize_answer(&word.english)];
    if word.article.is_some() {
        answers.push(normalize_answer(&word.answer_text()));
    }
    answers
}

pub fn is_typed_answer_correct(word: &WordEntry, typed: &str) -> bool {
    let typed = normalize_answer(typed);
    !typed.is_empty() && accepted_answers(word).contains(&typed)
}
