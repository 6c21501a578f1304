#![deny(clippy::string_slice)]

pub mod choices;
pub mod config;
pub mod results;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod simulation;
pub mod storage;
pub mod streak;
pub mod timer;
mod utils;
pub mod weights;

pub use choices::{generate_choices, generate_choices_with_count};
pub use config::GameConfig;
pub use results::{ResultsSummary, clear_progress, finish_results};
pub use scoring::{FeedbackLevel, calculate_percentage, classify_feedback, feedback_emoji};
pub use selection::{retry_words, select_weighted_words};
pub use session::{AnswerOutcome, GameMode, Session, SessionError, SessionPhase, SessionView};
pub use simulation::SessionSimulationIterator;
pub use storage::{KeyValueStore, MemoryStore, StorageError, Store};
pub use streak::{StreakOutcome, StreakPhase, StreakRun, StreakView};
pub use timer::{AdvanceTicket, AdvanceTimer};
pub use weights::{WeightTable, next_weight, update_weight};

use std::cell::RefCell;
use std::sync::LazyLock;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;
use word_data::{
    CategoryInfo, Language, StreakStats, WordEntry, all_words, categories, words_by_category,
};

use crate::session::Advance;
use crate::storage::BrowserStore;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_categories() -> Vec<CategoryInfo> {
    categories()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_words_by_category(category: String) -> Vec<WordEntry> {
    words_by_category(&category)
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl From<SessionError> for JsValue {
    fn from(error: SessionError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

// putting this inside LOGGER prevents us from accidentally initializing the logger more than once
#[allow(clippy::declare_interior_mutable_const)]
const LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
});

/// The engine as the UI sees it: one play/challenge session and one streak
/// run at a time, persisted to the browser's storage.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct WordGame {
    // we never hold a borrow across a call back into JS, so none of these can panic on borrow
    store: Store<BrowserStore>,
    rng: RefCell<ChaCha8Rng>,
    config: GameConfig,
    session: RefCell<Option<Session>>,
    streak: RefCell<Option<StreakRun>>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl WordGame {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(config: Option<GameConfig>) -> Self {
        // used to only initialize the logger once
        #[allow(clippy::borrow_interior_mutable_const)]
        *LOGGER;

        Self::with_parts(
            BrowserStore::default(),
            ChaCha8Rng::from_entropy(),
            config.unwrap_or_default(),
        )
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn language(&self) -> Language {
        self.store.language()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn set_language(&self, language: Language) {
        self.store.set_language(language);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn toggle_language(&self) -> Language {
        let language = self.store.language().toggled();
        self.store.set_language(language);
        language
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn best_score(&self) -> u32 {
        self.store.best_score()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn streak_stats(&self) -> StreakStats {
        self.store.streak_stats()
    }

    // =======
    // play and challenge
    // =======

    /// Starts a new session, dropping any unfinished one. With `retry`, plays
    /// exactly those words (by `english`) instead of a weighted batch.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn start_session(
        &self,
        mode: GameMode,
        category: String,
        retry: Option<Vec<String>>,
    ) -> SessionView {
        let mut rng = self.rng.borrow_mut();
        let (words, pool) = match retry {
            Some(missed) => (
                retry_words(&missed, all_words(), &mut *rng),
                all_words().to_vec(),
            ),
            None => {
                let pool = words_by_category(&category);
                let words =
                    selection::select_batch(&self.store, &pool, self.config.batch_len(), &mut *rng);
                (words, pool)
            }
        };
        log::info!("Starting {mode} session with {} words", words.len());

        let session = Session::new(mode, words, pool, self.config, &mut *rng);
        let view = session.view();
        if let Some(mut previous) = self.session.borrow_mut().replace(session) {
            previous.abandon();
        }
        view
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn session_view(&self) -> Option<SessionView> {
        self.session.borrow().as_ref().map(Session::view)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn submit_answer(
        &self,
        answer: String,
        timestamp_ms: f64,
    ) -> Result<AnswerOutcome, SessionError> {
        let mut session = self.session.borrow_mut();
        let session = session.as_mut().ok_or(SessionError::NotStarted)?;
        session.submit(&answer, &self.store, utils::timestamp_from_ms(timestamp_ms))
    }

    /// Called by the UI's timeout with the ticket from `submit_answer`.
    /// Returns the view to render, or `None` if there is no session.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn advance_session(&self, ticket_id: u32, timestamp_ms: f64) -> Option<SessionView> {
        let mut session = self.session.borrow_mut();
        let session = session.as_mut()?;
        let advance = session.advance(
            ticket_id,
            utils::timestamp_from_ms(timestamp_ms),
            &self.store,
            &mut *self.rng.borrow_mut(),
        );
        if advance == Advance::Ignored {
            log::debug!("Ignoring advance ticket {ticket_id}");
        }
        Some(session.view())
    }

    /// Leaving mid-session. Progress of the session is not saved.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn abandon_session(&self) {
        if let Some(mut session) = self.session.borrow_mut().take() {
            session.abandon();
        }
    }

    // =======
    // results
    // =======

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn finish_results(&self) -> Option<ResultsSummary> {
        finish_results(&self.store)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn clear_progress(&self) {
        clear_progress(&self.store);
    }

    // =======
    // streak
    // =======

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn start_streak(&self, category: String) -> StreakView {
        let run = StreakRun::start(
            &category,
            &self.store,
            self.config,
            &mut *self.rng.borrow_mut(),
        );
        let view = run.view();
        if let Some(mut previous) = self.streak.borrow_mut().replace(run) {
            previous.leave();
        }
        view
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn streak_view(&self) -> Option<StreakView> {
        self.streak.borrow().as_ref().map(StreakRun::view)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn submit_streak_choice(
        &self,
        choice: String,
        timestamp_ms: f64,
    ) -> Result<StreakOutcome, SessionError> {
        let mut run = self.streak.borrow_mut();
        let run = run.as_mut().ok_or(SessionError::NotStarted)?;
        run.submit(&choice, &self.store, utils::timestamp_from_ms(timestamp_ms))
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn advance_streak(&self, ticket_id: u32, timestamp_ms: f64) -> Option<StreakView> {
        let mut run = self.streak.borrow_mut();
        let run = run.as_mut()?;
        run.advance(
            ticket_id,
            utils::timestamp_from_ms(timestamp_ms),
            &self.store,
            &mut *self.rng.borrow_mut(),
        );
        Some(run.view())
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn retry_streak(&self) -> Result<StreakView, SessionError> {
        let mut run = self.streak.borrow_mut();
        let run = run.as_mut().ok_or(SessionError::NotStarted)?;
        run.retry(&self.store, &mut *self.rng.borrow_mut())?;
        Ok(run.view())
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn leave_streak(&self) {
        if let Some(mut run) = self.streak.borrow_mut().take() {
            run.leave();
        }
    }
}

impl WordGame {
    /// Builds a game around an explicit backend and RNG, skipping logger setup.
    pub fn with_parts(backend: BrowserStore, rng: ChaCha8Rng, config: GameConfig) -> Self {
        Self {
            store: Store::new(backend),
            rng: RefCell::new(rng),
            config,
            session: RefCell::new(None),
            streak: RefCell::new(None),
        }
    }

    pub fn store(&self) -> &Store<BrowserStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> WordGame {
        WordGame::with_parts(
            MemoryStore::new(),
            ChaCha8Rng::seed_from_u64(51),
            GameConfig {
                batch_size: 3,
                ..GameConfig::default()
            },
        )
    }

    #[test]
    fn test_language_toggle_persists() {
        let game = game();
        assert_eq!(game.language(), Language::Fi);
        assert_eq!(game.toggle_language(), Language::En);
        assert_eq!(game.store().backend().raw("language").as_deref(), Some("en"));
        game.set_language(Language::Fi);
        assert_eq!(game.language(), Language::Fi);
    }

    #[test]
    fn test_full_session_through_facade() {
        let game = game();
        let view = game.start_session(GameMode::Play, "animals".to_string(), None);
        assert_eq!(view.total, 3);

        let mut now = 0.0;
        let mut missed = Vec::new();
        for _ in 0..3 {
            let view = game.session_view().unwrap();
            let word = view.word.unwrap();
            // miss the first word only
            let answer = if missed.is_empty() {
                missed.push(word.english.clone());
                "a unicorn".to_string()
            } else {
                word.answer_text()
            };
            let outcome = game.submit_answer(answer, now).unwrap();
            now += f64::from(outcome.ticket.delay_ms);
            game.advance_session(outcome.ticket.id, now).unwrap();
        }
        assert_eq!(game.session_view().unwrap().phase, SessionPhase::Complete);

        let summary = game.finish_results().unwrap();
        assert_eq!(summary.correct_answers, 2);
        assert_eq!(summary.incorrect_words, missed);
        assert_eq!(summary.percentage, 67);
        assert_eq!(game.best_score(), 2);
        game.clear_progress();
        assert!(game.finish_results().is_none());

        let retry = game.start_session(GameMode::Challenge, "all".to_string(), Some(missed));
        assert_eq!(retry.total, 1);
        assert!(retry.choices.is_empty());
    }

    #[test]
    fn test_restart_drops_unfinished_session() {
        let game = game();
        game.start_session(GameMode::Play, "food".to_string(), None);
        let answer = game.session_view().unwrap().word.unwrap().answer_text();
        let ticket = game.submit_answer(answer, 0.0).unwrap().ticket;

        let view = game.start_session(GameMode::Play, "food".to_string(), None);
        assert_eq!(view.phase, SessionPhase::AwaitingAnswer);
        let after = game.advance_session(ticket.id, 10_000.0).unwrap();
        assert_eq!(after.index, 0);
        assert_eq!(after.phase, SessionPhase::AwaitingAnswer);
    }

    #[test]
    fn test_submit_without_session() {
        let game = game();
        assert_eq!(
            game.submit_answer("a dog".to_string(), 0.0),
            Err(SessionError::NotStarted)
        );
        assert!(game.advance_session(1, 0.0).is_none());
    }

    #[test]
    fn test_streak_through_facade() {
        let game = game();
        let view = game.start_streak("transport".to_string());
        let correct = view.word.unwrap().answer_text();
        let outcome = game.submit_streak_choice(correct, 0.0).unwrap();
        assert_eq!(outcome.stats.current, 1);
        assert_eq!(game.streak_stats().current, 1);
        let view = game.advance_streak(outcome.ticket.unwrap().id, 1200.0).unwrap();
        assert_eq!(view.phase, StreakPhase::AwaitingAnswer);

        let outcome = game.submit_streak_choice("a spaceship".to_string(), 2000.0).unwrap();
        assert_eq!(outcome.broken_streak, 1);
        assert_eq!(game.streak_stats(), StreakStats { current: 0, best: 1 });
        let view = game.retry_streak().unwrap();
        assert_eq!(view.phase, StreakPhase::AwaitingAnswer);
        assert_eq!(game.retry_streak(), Err(SessionError::StreakNotBroken));

        game.leave_streak();
        assert!(game.streak_view().is_none());
    }

    #[test]
    fn test_categories_and_words() {
        assert_eq!(get_categories().len(), 7);
        assert_eq!(get_words_by_category("all".to_string()).len(), all_words().len());
    }
}
