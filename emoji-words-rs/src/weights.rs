//! Adaptive per-word weights.
//!
//! A miss makes a word heavier so it comes back sooner; a hit lets it drift
//! back towards the floor. Words that were never answered use their catalog
//! base weight.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use word_data::WordEntry;

use crate::storage::{KeyValueStore, Store};

/// Lowest weight a correct answer can bring a word down to.
pub const WEIGHT_FLOOR: f64 = 1.0;
pub const CORRECT_DECAY: f64 = 0.5;
pub const INCORRECT_BOOST: f64 = 1.0;

/// Weights keyed by `english`. Stored as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable(BTreeMap<String, f64>);

impl WeightTable {
    pub fn get(&self, english: &str) -> Option<f64> {
        self.0.get(english).copied()
    }

    pub fn set(&mut self, english: &str, weight: f64) {
        self.0.insert(english.to_string(), weight);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Stored weight if present, otherwise the word's base weight.
    pub fn effective_weight(&self, word: &WordEntry) -> f64 {
        self.get(&word.english).unwrap_or(word.base_weight)
    }
}

impl FromIterator<(String, f64)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn next_weight(current: f64, was_correct: bool) -> f64 {
    if was_correct {
        (current - CORRECT_DECAY).max(WEIGHT_FLOOR)
    } else {
        current + INCORRECT_BOOST
    }
}

/// Applies one answer to the stored weight table and persists it.
/// Returns the word's new weight.
pub fn update_weight<S: KeyValueStore>(
    store: &Store<S>,
    word: &WordEntry,
    was_correct: bool,
) -> f64 {
    let mut weights = store.weights();
    let weight = next_weight(weights.effective_weight(word), was_correct);
    weights.set(&word.english, weight);
    store.save_weights(&weights);
    log::debug!(
        "{} answered {}, weight now {weight}",
        word.english,
        if was_correct { "correctly" } else { "incorrectly" }
    );
    weight
}
