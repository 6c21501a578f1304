//! Persistence of learner state in a string key-value store.
//!
//! In the browser this is `localStorage`; elsewhere (tests, simulation) an
//! in-memory map. Every read goes through [`Store::load`], which turns missing
//! keys, unavailable storage and malformed content into `None` after logging,
//! so callers only ever choose a default. Writes are logged and dropped on
//! failure; the game keeps running on in-memory state.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use word_data::{GameProgress, Language, StreakStats};

use crate::weights::WeightTable;

pub const LANGUAGE_KEY: &str = "language";
pub const WEIGHTS_KEY: &str = "wordWeights";
pub const PROGRESS_KEY: &str = "gameProgress";
pub const BEST_SCORE_KEY: &str = "bestScore";
pub const STREAK_KEY: &str = "streakStats";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("reading {key} failed: {message}")]
    Read { key: String, message: String },

    #[error("writing {key} failed: {message}")]
    Write { key: String, message: String },

    #[error("malformed JSON under {key}")]
    Json {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected value {value:?} under {key}")]
    Invalid { key: &'static str, value: String },
}

/// Raw string storage. Implementations use interior mutability, like the
/// browser storage they stand in for.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::{KeyValueStore, StorageError};

    /// `window.localStorage`. Missing when storage is disabled (e.g. some
    /// private browsing modes); every call then fails with `Unavailable`.
    #[derive(Debug)]
    pub struct LocalStorage {
        storage: Option<web_sys::Storage>,
    }

    impl LocalStorage {
        pub fn new() -> Self {
            let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
            if storage.is_none() {
                log::warn!("localStorage is not available, progress will not be saved");
            }
            Self { storage }
        }

        fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
            self.storage.as_ref().ok_or(StorageError::Unavailable)
        }
    }

    impl Default for LocalStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage()?
                .get_item(key)
                .map_err(|e| StorageError::Read {
                    key: key.to_string(),
                    message: format!("{e:?}"),
                })
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Write {
                    key: key.to_string(),
                    message: format!("{e:?}"),
                })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.storage()?
                .remove_item(key)
                .map_err(|e| StorageError::Write {
                    key: key.to_string(),
                    message: format!("{e:?}"),
                })
        }
    }
}

/// The backend the wasm facade persists to.
#[cfg(target_arch = "wasm32")]
pub type BrowserStore = LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type BrowserStore = MemoryStore;

/// A value persisted under a fixed key.
pub trait StoredValue: Sized {
    const KEY: &'static str;

    fn to_stored(&self) -> Result<String, StorageError>;
    fn from_stored(raw: &str) -> Result<Self, StorageError>;
}

fn to_json<T: serde::Serialize>(key: &'static str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Json { key, source })
}

fn from_json<T: serde::de::DeserializeOwned>(
    key: &'static str,
    raw: &str,
) -> Result<T, StorageError> {
    serde_json::from_str(raw).map_err(|source| StorageError::Json { key, source })
}

impl StoredValue for Language {
    const KEY: &'static str = LANGUAGE_KEY;

    fn to_stored(&self) -> Result<String, StorageError> {
        Ok(self.to_string())
    }

    fn from_stored(raw: &str) -> Result<Self, StorageError> {
        raw.parse().map_err(|_| StorageError::Invalid {
            key: Self::KEY,
            value: raw.to_string(),
        })
    }
}

impl StoredValue for WeightTable {
    const KEY: &'static str = WEIGHTS_KEY;

    fn to_stored(&self) -> Result<String, StorageError> {
        to_json(Self::KEY, self)
    }

    /// An object is required, but entries that are not numbers are dropped
    /// one by one instead of losing the whole table.
    fn from_stored(raw: &str) -> Result<Self, StorageError> {
        let entries: BTreeMap<String, serde_json::Value> = from_json(Self::KEY, raw)?;
        Ok(entries
            .into_iter()
            .filter_map(|(english, value)| match value.as_f64() {
                Some(weight) => Some((english, weight)),
                None => {
                    log::warn!("Dropping stored weight {value} for {english}");
                    None
                }
            })
            .collect())
    }
}

impl StoredValue for GameProgress {
    const KEY: &'static str = PROGRESS_KEY;

    fn to_stored(&self) -> Result<String, StorageError> {
        to_json(Self::KEY, self)
    }

    fn from_stored(raw: &str) -> Result<Self, StorageError> {
        from_json(Self::KEY, raw)
    }
}

impl StoredValue for StreakStats {
    const KEY: &'static str = STREAK_KEY;

    fn to_stored(&self) -> Result<String, StorageError> {
        to_json(Self::KEY, self)
    }

    fn from_stored(raw: &str) -> Result<Self, StorageError> {
        from_json(Self::KEY, raw)
    }
}

/// Highest number of correct answers in a single session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BestScore(pub u32);

impl StoredValue for BestScore {
    const KEY: &'static str = BEST_SCORE_KEY;

    fn to_stored(&self) -> Result<String, StorageError> {
        Ok(self.0.to_string())
    }

    fn from_stored(raw: &str) -> Result<Self, StorageError> {
        raw.trim()
            .parse()
            .map(BestScore)
            .map_err(|_| StorageError::Invalid {
                key: Self::KEY,
                value: raw.to_string(),
            })
    }
}

/// Typed access to persisted learner state. Never fails: reads fall back to
/// defaults and failed writes are only logged.
#[derive(Debug, Default)]
pub struct Store<S> {
    backend: S,
}

impl<S: KeyValueStore> Store<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// `None` if the key is missing, the storage is unreadable or the content
    /// does not decode.
    pub fn load<T: StoredValue>(&self) -> Option<T> {
        let raw = self
            .backend
            .get(T::KEY)
            .inspect_err(|e| log::error!("Error reading {} from storage: {e}", T::KEY))
            .ok()??;
        T::from_stored(&raw)
            .inspect_err(|e| log::error!("Discarding stored {}: {e}", T::KEY))
            .ok()
    }

    /// Returns whether the value reached storage.
    pub fn save<T: StoredValue>(&self, value: &T) -> bool {
        let result = value
            .to_stored()
            .and_then(|raw| self.backend.set(T::KEY, &raw));
        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error saving {} to storage: {e}", T::KEY);
                false
            }
        }
    }

    pub fn remove<T: StoredValue>(&self) {
        if let Err(e) = self.backend.remove(T::KEY) {
            log::error!("Error removing {} from storage: {e}", T::KEY);
        }
    }

    pub fn language(&self) -> Language {
        self.load().unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) {
        self.save(&language);
    }

    pub fn weights(&self) -> WeightTable {
        self.load().unwrap_or_default()
    }

    pub fn save_weights(&self, weights: &WeightTable) {
        self.save(weights);
    }

    pub fn progress(&self) -> Option<GameProgress> {
        self.load()
    }

    pub fn save_progress(&self, progress: &GameProgress) {
        self.save(progress);
    }

    pub fn clear_progress(&self) {
        self.remove::<GameProgress>();
    }

    pub fn best_score(&self) -> u32 {
        self.load::<BestScore>().unwrap_or_default().0
    }

    /// Stores `score` only if it beats the stored best. Returns whether the
    /// new best actually reached storage.
    pub fn save_best_score_if_higher(&self, score: u32) -> bool {
        score > self.best_score() && self.save(&BestScore(score))
    }

    pub fn streak_stats(&self) -> StreakStats {
        self.load().unwrap_or_default()
    }

    pub fn save_streak_stats(&self, stats: &StreakStats) {
        self.save(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Storage that is present but refuses every operation, like a browser
    /// with storage blocked or over quota.
    #[derive(Debug, Default)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                message: "SecurityError".to_string(),
            })
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                message: "QuotaExceededError".to_string(),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn store_with(entries: &[(&str, &str)]) -> Store<MemoryStore> {
        let store = Store::new(MemoryStore::new());
        for (key, value) in entries {
            store.backend().set(key, value).unwrap();
        }
        store
    }

    #[test]
    fn test_missing_keys_give_defaults() {
        let store = store_with(&[]);
        assert_eq!(store.language(), Language::Fi);
        assert!(store.weights().is_empty());
        assert_eq!(store.progress(), None);
        assert_eq!(store.best_score(), 0);
        assert_eq!(store.streak_stats(), StreakStats::default());
    }

    #[test]
    fn test_corrupted_values_give_defaults() {
        let store = store_with(&[
            (LANGUAGE_KEY, "sv"),
            (WEIGHTS_KEY, "{not json"),
            (PROGRESS_KEY, r#"{"correctAnswers": "three"}"#),
            (BEST_SCORE_KEY, "lots"),
            (STREAK_KEY, "[1, 2]"),
        ]);
        assert_eq!(store.language(), Language::Fi);
        assert!(store.weights().is_empty());
        assert_eq!(store.progress(), None);
        assert_eq!(store.best_score(), 0);
        assert_eq!(store.streak_stats(), StreakStats::default());
    }

    #[test]
    fn test_weights_must_be_an_object_of_numbers() {
        let store = store_with(&[(WEIGHTS_KEY, r#"["dog", 2]"#)]);
        assert!(store.weights().is_empty());

        let store = store_with(&[(WEIGHTS_KEY, r#""heavy""#)]);
        assert!(store.weights().is_empty());
    }

    #[test]
    fn test_bad_weight_entries_are_dropped_alone() {
        let store = store_with(&[(
            WEIGHTS_KEY,
            r#"{"dog": "heavy", "cat": 3, "axe": null, "tent": 1.5}"#,
        )]);
        let weights = store.weights();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.get("cat"), Some(3.0));
        assert_eq!(weights.get("tent"), Some(1.5));
        assert_eq!(weights.get("dog"), None);
    }

    #[test]
    fn test_reads_existing_browser_data() {
        let store = store_with(&[
            (LANGUAGE_KEY, "en"),
            (WEIGHTS_KEY, r#"{"dog": 3, "sleeping bag": 1.5}"#),
            (
                PROGRESS_KEY,
                r#"{"correctAnswers":12,"incorrectAnswers":3,"incorrectWords":["axe","cap","axe"]}"#,
            ),
            (BEST_SCORE_KEY, "14"),
            (STREAK_KEY, r#"{"current":3,"best":7}"#),
        ]);
        assert_eq!(store.language(), Language::En);
        assert_eq!(store.weights().get("sleeping bag"), Some(1.5));
        let progress = store.progress().unwrap();
        assert_eq!(progress.correct_answers, 12);
        assert_eq!(progress.incorrect_words, vec!["axe", "cap", "axe"]);
        assert_eq!(store.best_score(), 14);
        assert_eq!(store.streak_stats(), StreakStats { current: 3, best: 7 });
    }

    #[test]
    fn test_language_is_stored_as_plain_string() {
        let store = store_with(&[]);
        store.set_language(Language::En);
        assert_eq!(store.backend().raw(LANGUAGE_KEY).as_deref(), Some("en"));
    }

    #[test]
    fn test_best_score_only_increases() {
        let store = store_with(&[]);
        assert!(store.save_best_score_if_higher(8));
        assert!(!store.save_best_score_if_higher(5));
        assert!(!store.save_best_score_if_higher(8));
        assert_eq!(store.backend().raw(BEST_SCORE_KEY).as_deref(), Some("8"));
        assert!(store.save_best_score_if_higher(11));
        assert_eq!(store.best_score(), 11);
    }

    #[test]
    fn test_clear_progress_removes_key() {
        let store = store_with(&[]);
        store.save_progress(&GameProgress::default());
        assert!(store.progress().is_some());
        store.clear_progress();
        assert!(store.backend().raw(PROGRESS_KEY).is_none());
    }

    #[test]
    fn test_broken_storage_never_panics() {
        let store = Store::new(BrokenStore);
        assert_eq!(store.language(), Language::Fi);
        assert!(!store.save(&Language::En));
        store.save_streak_stats(&StreakStats { current: 1, best: 1 });
        store.clear_progress();
        assert!(!store.save_best_score_if_higher(3));
        assert_eq!(store.best_score(), 0);
    }
}
