//! The built-in vocabulary.
//!
//! Every entry starts at a base weight of 1; adaptive weights are layered on
//! top of this by the engine and never written back here.

use std::sync::LazyLock;

use crate::{Article, Category, WordEntry};

const A: Option<Article> = Some(Article::A);
const AN: Option<Article> = Some(Article::An);
const BARE: Option<Article> = None;

const BASE_WEIGHT: f64 = 1.0;

/// Id accepted by [`words_by_category`] to select the whole catalog.
pub const ALL_CATEGORIES_ID: &str = "all";

#[rustfmt::skip]
const ENTRIES: &[(&str, &str, &str, Option<Article>, Category)] = &[
    ("🧴", "towel", "pyyhe", A, Category::Gear),
    ("🗺️", "map", "kartta", A, Category::Gear),
    ("☔", "umbrella", "sateenvarjo", AN, Category::Gear),
    ("🎒", "backpack", "reppu", A, Category::Gear),
    ("🍴", "fork", "haarukka", A, Category::Gear),
    ("🔪", "knife", "veitsi", A, Category::Gear),
    ("🍽️", "plate", "lautanen", A, Category::Gear),
    ("🥄", "spoon", "lusikka", A, Category::Gear),
    ("☕", "mug", "muki", A, Category::Gear),
    ("✂️", "scissors", "sakset", BARE, Category::Gear), // plural
    ("🔦", "flashlight", "taskulamppu", A, Category::Gear),
    ("🛏️", "sleeping bag", "makuupussi", A, Category::Gear),
    ("⛺", "tent", "teltta", A, Category::Gear),
    ("🩹", "first aid kit", "ensiapupakkaus", A, Category::Gear),
    ("🪓", "axe", "kirves", AN, Category::Gear),
    ("🕶️", "sunglasses", "aurinkolasit", BARE, Category::Gear), // plural

    ("🐶", "dog", "koira", A, Category::Animals),
    ("🐱", "cat", "kissa", A, Category::Animals),
    ("🐦", "bird", "lintu", A, Category::Animals),
    ("🐟", "fish", "kala", A, Category::Animals),
    ("🐴", "horse", "hevonen", A, Category::Animals),
    ("🐻", "bear", "karhu", A, Category::Animals),

    ("🍎", "apple", "omena", AN, Category::Food),
    ("🍌", "banana", "banaani", A, Category::Food),
    ("🍞", "bread", "leipä", BARE, Category::Food), // uncountable
    ("🧀", "cheese", "juusto", BARE, Category::Food), // uncountable
    ("🥛", "milk", "maito", BARE, Category::Food), // uncountable

    ("🌳", "tree", "puu", A, Category::Nature),
    ("🌸", "flower", "kukka", A, Category::Nature),
    ("⛰️", "mountain", "vuori", A, Category::Nature),
    ("🌊", "water", "vesi", BARE, Category::Nature), // uncountable
    ("☀️", "sun", "aurinko", BARE, Category::Nature), // "the sun"
    ("🌙", "moon", "kuu", BARE, Category::Nature), // "the moon"

    ("🚗", "car", "auto", A, Category::Transport),
    ("🚲", "bicycle", "polkupyörä", A, Category::Transport),
    ("✈️", "plane", "lentokone", A, Category::Transport),
    ("🚂", "train", "juna", A, Category::Transport),

    ("👕", "shirt", "paita", A, Category::Clothes),
    ("👖", "pants", "housut", BARE, Category::Clothes), // plural
    ("👟", "shoes", "kengät", BARE, Category::Clothes), // plural
    ("🧢", "cap", "lippalakki", A, Category::Clothes),

    ("🏠", "house", "talo", A, Category::Other),
    ("📱", "phone", "puhelin", A, Category::Other),
    ("📚", "books", "kirjat", BARE, Category::Other), // plural
    ("⚽", "ball", "pallo", A, Category::Other),
];

pub static WORDS: LazyLock<Vec<WordEntry>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|&(emoji, english, finnish, article, category)| WordEntry {
            emoji: emoji.to_string(),
            english: english.to_string(),
            finnish: finnish.to_string(),
            base_weight: BASE_WEIGHT,
            article,
            category,
        })
        .collect()
});

pub fn all_words() -> &'static [WordEntry] {
    &WORDS
}

pub fn find_word(english: &str) -> Option<&'static WordEntry> {
    WORDS.iter().find(|word| word.english == english)
}

/// Words for a category id, or the whole catalog for `"all"`.
/// Unknown ids give an empty list, which the UI shows as "no words available".
pub fn words_by_category(id: &str) -> Vec<WordEntry> {
    if id == ALL_CATEGORIES_ID {
        return all_words().to_vec();
    }
    match id.parse::<Category>() {
        Ok(category) => WORDS
            .iter()
            .filter(|word| word.category == category)
            .cloned()
            .collect(),
        Err(_) => {
            log::warn!("Unknown category id {id:?}");
            Vec::new()
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: Category,
    pub name_fi: String,
    pub name_en: String,
    pub emoji: String,
    pub count: usize,
    /// Colour family the category selector uses for this tile.
    pub tone: String,
}

impl Category {
    fn labels(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Category::Gear => ("Retkeilyvälineet", "Gear & home", "🎒", "amber"),
            Category::Animals => ("Eläimet", "Animals", "🐶", "orange"),
            Category::Food => ("Ruoka", "Food", "🍎", "rose"),
            Category::Nature => ("Luonto", "Nature", "🌳", "emerald"),
            Category::Transport => ("Liikenne", "Transport", "🚗", "sky"),
            Category::Clothes => ("Vaatteet", "Clothes", "👕", "violet"),
            Category::Other => ("Muuta", "Other", "📦", "slate"),
        }
    }
}

/// Category tiles in display order, skipping empty categories.
pub fn categories() -> Vec<CategoryInfo> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let count = WORDS.iter().filter(|w| w.category == category).count();
            if count == 0 {
                return None;
            }
            let (name_fi, name_en, emoji, tone) = category.labels();
            Some(CategoryInfo {
                id: category,
                name_fi: name_fi.to_string(),
                name_en: name_en.to_string(),
                emoji: emoji.to_string(),
                count,
                tone: tone.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_english_keys_are_unique() {
        let keys: BTreeSet<&str> = WORDS.iter().map(|w| w.english.as_str()).collect();
        assert_eq!(keys.len(), WORDS.len());
    }

    #[test]
    fn test_base_weights_are_positive() {
        assert!(WORDS.iter().all(|w| w.base_weight > 0.0));
    }

    #[test]
    fn test_all_returns_whole_catalog() {
        assert_eq!(words_by_category("all").len(), WORDS.len());
    }

    #[test]
    fn test_category_lookup_filters() {
        let animals = words_by_category("animals");
        assert_eq!(animals.len(), 6);
        assert!(animals.iter().all(|w| w.category == Category::Animals));
    }

    #[test]
    fn test_unknown_category_is_empty() {
        assert!(words_by_category("spaceships").is_empty());
    }

    #[test]
    fn test_category_counts_sum_to_catalog() {
        let total: usize = categories().iter().map(|c| c.count).sum();
        assert_eq!(total, WORDS.len());
    }

    #[test]
    fn test_find_word() {
        let apple = find_word("apple").unwrap();
        assert_eq!(apple.finnish, "omena");
        assert_eq!(apple.answer_text(), "an apple");
        assert!(find_word("unicorn").is_none());
    }
}
