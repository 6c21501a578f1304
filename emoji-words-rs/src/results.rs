use serde::{Deserialize, Serialize};

use crate::scoring::{FeedbackLevel, calculate_percentage, classify_feedback};
use crate::storage::{KeyValueStore, Store};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub total: u32,
    pub percentage: u32,
    pub feedback: FeedbackLevel,
    pub emoji: String,
    /// Missed words in order, repeats included. Feed to a retry session.
    pub incorrect_words: Vec<String>,
    /// Best score after this session was counted.
    pub best_score: u32,
    pub is_new_best: bool,
}

/// Reads the last finished session and counts it towards the best score.
/// `None` if there is no saved session or it cannot be read.
///
/// Progress is left in place; call [`clear_progress`] once the results have
/// been shown.
pub fn finish_results<S: KeyValueStore>(store: &Store<S>) -> Option<ResultsSummary> {
    let progress = store.progress()?;
    let previous_best = store.best_score();
    let is_new_best = store.save_best_score_if_higher(progress.correct_answers);
    let best_score = if is_new_best {
        progress.correct_answers
    } else {
        previous_best
    };

    let total = progress.total();
    let percentage = calculate_percentage(progress.correct_answers, total);
    let feedback = classify_feedback(percentage);

    Some(ResultsSummary {
        correct_answers: progress.correct_answers,
        incorrect_answers: progress.incorrect_answers,
        total,
        percentage,
        feedback,
        emoji: feedback.emoji().to_string(),
        incorrect_words: progress.incorrect_words,
        best_score,
        is_new_best,
    })
}

pub fn clear_progress<S: KeyValueStore>(store: &Store<S>) {
    store.clear_progress();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BEST_SCORE_KEY, MemoryStore, PROGRESS_KEY, StorageError};
    use word_data::GameProgress;

    /// Keeps everything except the best score, like a quota that fills up
    /// at the wrong moment.
    #[derive(Default)]
    struct BestScoreRefused(MemoryStore);

    impl KeyValueStore for BestScoreRefused {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == BEST_SCORE_KEY {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    message: "QuotaExceededError".to_string(),
                });
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    fn progress(correct: u32, missed: &[&str]) -> GameProgress {
        GameProgress {
            correct_answers: correct,
            incorrect_answers: missed.len() as u32,
            incorrect_words: missed.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn test_no_progress_no_results() {
        let store = Store::new(MemoryStore::new());
        assert_eq!(finish_results(&store), None);
    }

    #[test]
    fn test_summary_and_best_score() {
        let store = Store::new(MemoryStore::new());
        store.save_progress(&progress(12, &["axe", "cap", "tent"]));

        let summary = finish_results(&store).unwrap();
        assert_eq!(summary.total, 15);
        assert_eq!(summary.percentage, 80);
        assert_eq!(summary.feedback, FeedbackLevel::Great);
        assert_eq!(summary.emoji, "😊");
        assert_eq!(summary.incorrect_words, vec!["axe", "cap", "tent"]);
        assert_eq!(summary.best_score, 12);
        assert!(summary.is_new_best);

        store.save_progress(&progress(7, &["axe"]));
        let summary = finish_results(&store).unwrap();
        assert_eq!(summary.best_score, 12);
        assert!(!summary.is_new_best);
        assert_eq!(store.best_score(), 12);
    }

    #[test]
    fn test_clear_progress() {
        let store = Store::new(MemoryStore::new());
        store.save_progress(&progress(1, &[]));
        clear_progress(&store);
        assert_eq!(finish_results(&store), None);
    }

    #[test]
    fn test_unsaved_best_score_is_not_reported() {
        let store = Store::new(BestScoreRefused::default());
        store.save_progress(&progress(9, &["axe"]));
        let summary = finish_results(&store).unwrap();
        assert!(!summary.is_new_best);
        assert_eq!(summary.best_score, 0);
        assert_eq!(store.best_score(), 0);
    }

    #[test]
    fn test_saturated_progress_from_storage() {
        let store = Store::new(MemoryStore::new());
        store
            .backend()
            .set(
                PROGRESS_KEY,
                r#"{"correctAnswers":4294967295,"incorrectAnswers":1,"incorrectWords":["dog"]}"#,
            )
            .unwrap();
        let summary = finish_results(&store).unwrap();
        assert_eq!(summary.total, u32::MAX);
        assert_eq!(summary.correct_answers, u32::MAX);
        assert_eq!(summary.percentage, 100);
        assert!(summary.is_new_best);
        assert_eq!(store.best_score(), u32::MAX);
    }
}
