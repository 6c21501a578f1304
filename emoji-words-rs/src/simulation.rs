use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use word_data::{WordEntry, all_words};

use crate::config::GameConfig;
use crate::results::{ResultsSummary, clear_progress, finish_results};
use crate::selection::select_batch;
use crate::session::{Advance, GameMode, Session};
use crate::storage::{MemoryStore, Store};

/// Everything that happened in one simulated session.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedSession {
    /// `english` keys in the order they were asked.
    pub asked: Vec<String>,
    pub summary: Option<ResultsSummary>,
}

/// Plays one full session per call against an in-memory store, with a learner
/// who knows some words and picks up each unknown word after missing it a few
/// times. Sessions are a day apart.
pub struct SessionSimulationIterator {
    store: Store<MemoryStore>,
    rng: ChaCha8Rng,
    config: GameConfig,
    mode: GameMode,
    current_time: DateTime<Utc>,
    known: BTreeSet<String>,
    misses: BTreeMap<String, u32>,
    misses_to_learn: u32,
}

impl SessionSimulationIterator {
    /// The seed and start time fully determine the run.
    pub fn new(seed: u64, start_time: DateTime<Utc>, mode: GameMode) -> Self {
        Self {
            store: Store::new(MemoryStore::new()),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config: GameConfig::default(),
            mode,
            current_time: start_time,
            known: BTreeSet::new(),
            misses: BTreeMap::new(),
            misses_to_learn: 1,
        }
    }

    pub fn with_known_words<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.known.extend(words.into_iter().map(str::to_string));
        self
    }

    pub fn with_misses_to_learn(mut self, misses: u32) -> Self {
        self.misses_to_learn = misses.max(1);
        self
    }

    pub fn store(&self) -> &Store<MemoryStore> {
        &self.store
    }

    fn answer_for(&self, word: &WordEntry, choices: &[String]) -> String {
        let correct = match self.mode {
            GameMode::Play => word.answer_text(),
            GameMode::Challenge => word.english.clone(),
        };
        if self.known.contains(&word.english) {
            return correct;
        }
        match self.mode {
            GameMode::Play => choices
                .iter()
                .find(|choice| **choice != correct)
                .cloned()
                .unwrap_or_default(),
            GameMode::Challenge => "no idea".to_string(),
        }
    }

    fn learn_from_miss(&mut self, english: &str) {
        let misses = self.misses.entry(english.to_string()).or_default();
        *misses += 1;
        if *misses >= self.misses_to_learn {
            self.known.insert(english.to_string());
        }
    }

    pub fn next(mut self) -> (Self, SimulatedSession) {
        let pool = all_words().to_vec();
        let words = select_batch(&self.store, &pool, self.config.batch_len(), &mut self.rng);
        let mut session = Session::new(self.mode, words, pool, self.config, &mut self.rng);
        let mut asked = Vec::new();
        let mut now = self.current_time;

        while let Some(word) = session.current_word().cloned() {
            asked.push(word.english.clone());
            let answer = self.answer_for(&word, session.choices());
            let outcome = match session.submit(&answer, &self.store, now) {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Simulated answer for {} rejected: {e}", word.english);
                    break;
                }
            };
            if !outcome.was_correct {
                self.learn_from_miss(&word.english);
            }

            now += Duration::milliseconds(i64::from(outcome.ticket.delay_ms));
            if session.advance(outcome.ticket.id, now, &self.store, &mut self.rng)
                == Advance::Complete
            {
                break;
            }
        }

        let summary = finish_results(&self.store);
        clear_progress(&self.store);

        self.current_time += Duration::days(1);
        (self, SimulatedSession { asked, summary })
    }
}
