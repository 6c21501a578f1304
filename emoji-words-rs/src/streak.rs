//! Streak mode: one word at a time from a category, until the first miss.
//!
//! A correct answer moves on to a new word after a short pause. A miss resets
//! the streak and waits for an explicit retry. Streak stats are saved after
//! every answer and survive between runs.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use word_data::{StreakStats, WordEntry, words_by_category};

use crate::choices::generate_choices_with_count;
use crate::config::GameConfig;
use crate::selection::select_batch;
use crate::session::SessionError;
use crate::storage::{KeyValueStore, Store};
use crate::timer::{AdvanceTicket, AdvanceTimer, FireResult};
use crate::weights::update_weight;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreakPhase {
    AwaitingAnswer,
    /// Answered correctly; the next word comes when the ticket fires.
    Correct,
    Broken {
        #[serde(rename = "brokenStreak")]
        broken_streak: u32,
        #[serde(rename = "correctAnswer")]
        correct_answer: String,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct StreakOutcome {
    pub was_correct: bool,
    pub stats: StreakStats,
    pub is_new_best: bool,
    /// Length of the streak that just ended, 0 after a correct answer.
    pub broken_streak: u32,
    pub correct_answer: String,
    /// Only after a correct answer.
    pub ticket: Option<AdvanceTicket>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct StreakView {
    pub category: String,
    pub phase: StreakPhase,
    /// `None` when the category has no words.
    pub word: Option<WordEntry>,
    pub choices: Vec<String>,
    pub stats: StreakStats,
}

#[derive(Clone, Debug)]
pub struct StreakRun {
    category: String,
    pool: Vec<WordEntry>,
    current: Option<WordEntry>,
    choices: Vec<String>,
    stats: StreakStats,
    phase: StreakPhase,
    timer: AdvanceTimer,
    config: GameConfig,
}

impl StreakRun {
    /// Loads the saved stats and draws the first word of `category`.
    pub fn start<S: KeyValueStore, R: Rng + ?Sized>(
        category: &str,
        store: &Store<S>,
        config: GameConfig,
        rng: &mut R,
    ) -> Self {
        let mut run = Self {
            category: category.to_string(),
            pool: words_by_category(category),
            current: None,
            choices: Vec::new(),
            stats: store.streak_stats(),
            phase: StreakPhase::AwaitingAnswer,
            timer: AdvanceTimer::default(),
            config,
        };
        run.draw_next(store, rng);
        run
    }

    fn draw_next<S: KeyValueStore, R: Rng + ?Sized>(&mut self, store: &Store<S>, rng: &mut R) {
        self.timer.cancel();
        self.phase = StreakPhase::AwaitingAnswer;
        // zeroed or junk weights leave nothing to draw; pick any word instead
        self.current = select_batch(store, &self.pool, 1, rng)
            .pop()
            .or_else(|| self.pool.choose(rng).cloned());
        self.choices = match &self.current {
            Some(word) => {
                generate_choices_with_count(word, &self.pool, self.config.choices_len(), rng)
            }
            None => Vec::new(),
        };
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn phase(&self) -> &StreakPhase {
        &self.phase
    }

    pub fn current_word(&self) -> Option<&WordEntry> {
        self.current.as_ref()
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn stats(&self) -> StreakStats {
        self.stats
    }

    pub fn view(&self) -> StreakView {
        StreakView {
            category: self.category.clone(),
            phase: self.phase.clone(),
            word: self.current.clone(),
            choices: self.choices.clone(),
            stats: self.stats,
        }
    }

    /// Resolves a dropped choice against the current word.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        choice: &str,
        store: &Store<S>,
        now: DateTime<Utc>,
    ) -> Result<StreakOutcome, SessionError> {
        if self.phase != StreakPhase::AwaitingAnswer {
            return Err(SessionError::NotAwaitingAnswer);
        }
        let word = self.current.as_ref().ok_or(SessionError::NoCurrentWord)?;
        let correct_answer = word.answer_text();
        let was_correct = choice == correct_answer;

        let update = self.stats.record(was_correct);
        self.stats = update.stats;
        store.save_streak_stats(&self.stats);
        update_weight(store, word, was_correct);

        let ticket = if was_correct {
            self.phase = StreakPhase::Correct;
            Some(self.timer.schedule(self.config.streak_delay_ms, now))
        } else {
            self.timer.cancel();
            log::info!("Streak of {} ended on {}", update.broken_streak, word.english);
            self.phase = StreakPhase::Broken {
                broken_streak: update.broken_streak,
                correct_answer: correct_answer.clone(),
            };
            None
        };

        Ok(StreakOutcome {
            was_correct,
            stats: self.stats,
            is_new_best: update.is_new_best,
            broken_streak: update.broken_streak,
            correct_answer,
            ticket,
        })
    }

    /// Draws the next word once the pause after a correct answer is over.
    /// Returns whether a new word was drawn.
    pub fn advance<S: KeyValueStore, R: Rng + ?Sized>(
        &mut self,
        ticket_id: u32,
        now: DateTime<Utc>,
        store: &Store<S>,
        rng: &mut R,
    ) -> bool {
        if self.phase != StreakPhase::Correct {
            return false;
        }
        match self.timer.fire(ticket_id, now) {
            FireResult::Fired => {
                self.draw_next(store, rng);
                true
            }
            FireResult::Stale => false,
        }
    }

    /// Starts over after a miss with a freshly drawn word.
    pub fn retry<S: KeyValueStore, R: Rng + ?Sized>(
        &mut self,
        store: &Store<S>,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        if !matches!(self.phase, StreakPhase::Broken { .. }) {
            return Err(SessionError::StreakNotBroken);
        }
        self.draw_next(store, rng);
        Ok(())
    }

    pub fn leave(&mut self) {
        self.timer.cancel();
    }

    pub fn has_pending_advance(&self) -> bool {
        self.timer.is_pending()
    }
}
