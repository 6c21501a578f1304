pub mod catalog;
pub mod progress;
pub mod text_cleanup;

pub use catalog::{CategoryInfo, WORDS, all_words, categories, find_word, words_by_category};
pub use progress::{GameProgress, StreakStats, StreakUpdate};

#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    PartialEq,
    Eq,
    Ord,
    PartialOrd,
    Hash,
    Default,
    tsify::Tsify,
    parse_display::Display,
    parse_display::FromStr,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
#[display(style = "lowercase")]
pub enum Language {
    #[default]
    Fi,
    En,
}

impl Language {
    /// The language the toggle switches to.
    pub fn toggled(self) -> Self {
        match self {
            Language::Fi => Language::En,
            Language::En => Language::Fi,
        }
    }
}

/// English indefinite article. Uncountable and plural nouns have none.
#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    PartialEq,
    Eq,
    Ord,
    PartialOrd,
    Hash,
    tsify::Tsify,
    parse_display::Display,
    parse_display::FromStr,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
#[display(style = "lowercase")]
pub enum Article {
    A,
    An,
}

#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    PartialEq,
    Eq,
    Ord,
    PartialOrd,
    Hash,
    tsify::Tsify,
    parse_display::Display,
    parse_display::FromStr,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
#[display(style = "snake_case")]
pub enum Category {
    Gear,
    Animals,
    Food,
    Nature,
    Transport,
    Clothes,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Gear,
        Category::Animals,
        Category::Food,
        Category::Nature,
        Category::Transport,
        Category::Clothes,
        Category::Other,
    ];
}

/// A single vocabulary card. `english` is the identity key used for weights.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Empty when no emoji fits the word.
    pub emoji: String,
    pub english: String,
    pub finnish: String,
    pub base_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    pub category: Category,
}

impl WordEntry {
    /// The answer as shown on a choice button, e.g. "an apple" or "scissors".
    pub fn answer_text(&self) -> String {
        match self.article {
            Some(article) => format!("{article} {}", self.english),
            None => self.english.clone(),
        }
    }
}
