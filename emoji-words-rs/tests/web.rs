//! Browser-only tests against the real `localStorage`.

#![cfg(target_arch = "wasm32")]

use emoji_words_rs::storage::{LocalStorage, PROGRESS_KEY};
use emoji_words_rs::{KeyValueStore, Store};
use wasm_bindgen_test::*;
use word_data::{GameProgress, Language};

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_store() -> Store<LocalStorage> {
    let backend = LocalStorage::new();
    for key in ["language", "wordWeights", "gameProgress", "bestScore", "streakStats"] {
        backend.remove(key).unwrap();
    }
    Store::new(backend)
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let store = fresh_store();
    assert_eq!(store.language(), Language::Fi);
    store.set_language(Language::En);
    assert_eq!(store.language(), Language::En);
}

#[wasm_bindgen_test]
fn local_storage_progress_is_cleared() {
    let store = fresh_store();
    let mut progress = GameProgress::default();
    progress.record("dog", false);
    store.save_progress(&progress);
    assert_eq!(store.progress(), Some(progress));
    store.clear_progress();
    assert_eq!(store.backend().get(PROGRESS_KEY).unwrap(), None);
}

#[wasm_bindgen_test]
fn local_storage_garbage_is_ignored() {
    let store = fresh_store();
    store.backend().set("streakStats", "{").unwrap();
    assert_eq!(store.streak_stats().best, 0);
}
