use serde::{Deserialize, Serialize};

use crate::session::GameMode;

/// Tunables passed in from the UI. Missing fields take their defaults.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Words per play or challenge session.
    pub batch_size: u32,
    /// Options shown per word, correct one included.
    pub choice_count: u32,
    pub play_delay_ms: u32,
    /// Longer than play, since the correct answer is shown after a typed miss.
    pub challenge_delay_ms: u32,
    /// Pause after a correct streak answer. A miss waits for an explicit retry.
    pub streak_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            batch_size: 15,
            choice_count: 4,
            play_delay_ms: 1500,
            challenge_delay_ms: 2000,
            streak_delay_ms: 1200,
        }
    }
}

impl GameConfig {
    pub fn delay_for(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Play => self.play_delay_ms,
            GameMode::Challenge => self.challenge_delay_ms,
        }
    }

    pub(crate) fn batch_len(&self) -> usize {
        self.batch_size as usize
    }

    pub(crate) fn choices_len(&self) -> usize {
        self.choice_count as usize
    }
}
