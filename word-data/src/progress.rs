use serde::{Deserialize, Serialize};

/// Aggregate of one play-through, persisted once when the session ends.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct GameProgress {
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    /// `english` keys in the order they were missed.
    pub incorrect_words: Vec<String>,
}

impl GameProgress {
    pub fn record(&mut self, english: &str, was_correct: bool) {
        if was_correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
        } else {
            self.incorrect_answers = self.incorrect_answers.saturating_add(1);
            self.incorrect_words.push(english.to_string());
        }
    }

    pub fn total(&self) -> u32 {
        self.correct_answers.saturating_add(self.incorrect_answers)
    }
}

/// Long-lived streak counters. `best` never drops below any `current` seen.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct StreakStats {
    pub current: u32,
    pub best: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct StreakUpdate {
    pub stats: StreakStats,
    pub is_new_best: bool,
    /// Length of the streak that was just lost, 0 after a correct answer.
    pub broken_streak: u32,
}

impl StreakStats {
    pub fn record_correct(self) -> StreakUpdate {
        let current = self.current.saturating_add(1);
        let is_new_best = current > self.best;
        StreakUpdate {
            stats: StreakStats {
                current,
                best: self.best.max(current),
            },
            is_new_best,
            broken_streak: 0,
        }
    }

    pub fn record_incorrect(self) -> StreakUpdate {
        StreakUpdate {
            stats: StreakStats {
                current: 0,
                best: self.best.max(self.current),
            },
            is_new_best: false,
            broken_streak: self.current,
        }
    }

    pub fn record(self, was_correct: bool) -> StreakUpdate {
        if was_correct {
            self.record_correct()
        } else {
            self.record_incorrect()
        }
    }
}
