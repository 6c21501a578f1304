//! One play-through of a batch of words in play or challenge mode.
//!
//! ```text
//! AwaitingAnswer --submit--> Resolved --advance(ticket)--> AwaitingAnswer
//!                                     \--advance(ticket), batch done--> Complete
//! any --abandon--> Abandoned
//! ```
//!
//! Every submission updates the word's weight right away. The session's
//! progress is written to the store once, when the last word is advanced past.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use word_data::text_cleanup::{is_typed_answer_correct, normalize_answer};
use word_data::{GameProgress, WordEntry};

use crate::choices::generate_choices_with_count;
use crate::config::GameConfig;
use crate::storage::{KeyValueStore, Store};
use crate::timer::{AdvanceTicket, AdvanceTimer, FireResult};
use crate::weights::update_weight;

#[derive(
    Clone,
    Copy,
    Debug,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    tsify::Tsify,
    parse_display::Display,
    parse_display::FromStr,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
#[display(style = "lowercase")]
pub enum GameMode {
    /// Pick the English word from a set of choices.
    Play,
    /// Type the English word.
    Challenge,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionPhase {
    AwaitingAnswer,
    Resolved {
        #[serde(rename = "wasCorrect")]
        was_correct: bool,
    },
    Complete,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("not waiting for an answer")]
    NotAwaitingAnswer,
    #[error("answer is empty")]
    EmptyAnswer,
    #[error("no word to answer")]
    NoCurrentWord,
    #[error("the streak is not broken")]
    StreakNotBroken,
    #[error("nothing is running")]
    NotStarted,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub was_correct: bool,
    /// What the learner should have answered, article included.
    pub correct_answer: String,
    pub new_weight: f64,
    /// Hand back to `advance` once the delay has passed.
    pub ticket: AdvanceTicket,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Ignored,
    NextWord,
    Complete,
}

/// Snapshot for rendering.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub mode: GameMode,
    pub phase: SessionPhase,
    pub word: Option<WordEntry>,
    /// Empty in challenge mode.
    pub choices: Vec<String>,
    /// Zero-based index of the current word.
    pub index: usize,
    pub total: usize,
    pub progress: GameProgress,
}

#[derive(Clone, Debug)]
pub struct Session {
    mode: GameMode,
    words: Vec<WordEntry>,
    /// Where distractors come from.
    pool: Vec<WordEntry>,
    index: usize,
    choices: Vec<String>,
    progress: GameProgress,
    phase: SessionPhase,
    timer: AdvanceTimer,
    config: GameConfig,
}

impl Session {
    /// An empty `words` gives a session with no current word, which the UI
    /// shows as "no words available".
    pub fn new<R: Rng + ?Sized>(
        mode: GameMode,
        words: Vec<WordEntry>,
        pool: Vec<WordEntry>,
        config: GameConfig,
        rng: &mut R,
    ) -> Self {
        let mut session = Self {
            mode,
            words,
            pool,
            index: 0,
            choices: Vec::new(),
            progress: GameProgress::default(),
            phase: SessionPhase::AwaitingAnswer,
            timer: AdvanceTimer::default(),
            config,
        };
        session.refresh_choices(rng);
        session
    }

    fn refresh_choices<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.choices = match (self.mode, self.words.get(self.index)) {
            (GameMode::Play, Some(word)) => {
                generate_choices_with_count(word, &self.pool, self.config.choices_len(), rng)
            }
            _ => Vec::new(),
        };
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_word(&self) -> Option<&WordEntry> {
        match self.phase {
            SessionPhase::Complete | SessionPhase::Abandoned => None,
            _ => self.words.get(self.index),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn has_pending_advance(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            mode: self.mode,
            phase: self.phase,
            word: self.current_word().cloned(),
            choices: self.choices.clone(),
            index: self.index,
            total: self.words.len(),
            progress: self.progress.clone(),
        }
    }

    fn grade(&self, word: &WordEntry, answer: &str) -> Result<bool, SessionError> {
        match self.mode {
            GameMode::Play => Ok(answer == word.answer_text()),
            GameMode::Challenge => {
                if normalize_answer(answer).is_empty() {
                    return Err(SessionError::EmptyAnswer);
                }
                Ok(is_typed_answer_correct(word, answer))
            }
        }
    }

    /// Grades `answer` against the current word and updates its weight.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        answer: &str,
        store: &Store<S>,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.phase != SessionPhase::AwaitingAnswer {
            return Err(SessionError::NotAwaitingAnswer);
        }
        let word = self
            .words
            .get(self.index)
            .ok_or(SessionError::NoCurrentWord)?;
        let was_correct = self.grade(word, answer)?;

        let new_weight = update_weight(store, word, was_correct);
        self.progress.record(&word.english, was_correct);
        self.phase = SessionPhase::Resolved { was_correct };
        let ticket = self.timer.schedule(self.config.delay_for(self.mode), now);

        Ok(AnswerOutcome {
            was_correct,
            correct_answer: word.answer_text(),
            new_weight,
            ticket,
        })
    }

    /// Moves past a resolved word. Only the ticket from the latest submission
    /// does anything, and only once its delay has elapsed.
    pub fn advance<S: KeyValueStore, R: Rng + ?Sized>(
        &mut self,
        ticket_id: u32,
        now: DateTime<Utc>,
        store: &Store<S>,
        rng: &mut R,
    ) -> Advance {
        if !matches!(self.phase, SessionPhase::Resolved { .. }) {
            return Advance::Ignored;
        }
        match self.timer.fire(ticket_id, now) {
            FireResult::Fired => {}
            FireResult::Stale => return Advance::Ignored,
        }

        if self.index + 1 < self.words.len() {
            self.index += 1;
            self.phase = SessionPhase::AwaitingAnswer;
            self.refresh_choices(rng);
            Advance::NextWord
        } else {
            self.phase = SessionPhase::Complete;
            self.choices.clear();
            store.save_progress(&self.progress);
            log::info!(
                "{} session complete: {}/{} correct",
                self.mode,
                self.progress.correct_answers,
                self.progress.total()
            );
            Advance::Complete
        }
    }

    /// Leaves without saving progress. Weights already written stay.
    pub fn abandon(&mut self) {
        self.timer.cancel();
        if self.phase != SessionPhase::Complete {
            self.phase = SessionPhase::Abandoned;
        }
    }
}
