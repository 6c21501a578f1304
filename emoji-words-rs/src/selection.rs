use rand::Rng;
use rand::seq::SliceRandom;
use weighted_sampler::sample_weighted_shuffled;
use word_data::WordEntry;

use crate::storage::{KeyValueStore, Store};
use crate::weights::WeightTable;

/// Picks up to `count` distinct words from `pool`, favouring heavier words,
/// in random order.
pub fn select_weighted_words<R: Rng + ?Sized>(
    pool: &[WordEntry],
    count: usize,
    weights: &WeightTable,
    rng: &mut R,
) -> Vec<WordEntry> {
    sample_weighted_shuffled(
        pool.to_vec(),
        count,
        |word| weights.effective_weight(word),
        rng,
    )
}

/// [`select_weighted_words`] against the persisted weight table.
pub fn select_batch<S: KeyValueStore, R: Rng + ?Sized>(
    store: &Store<S>,
    pool: &[WordEntry],
    count: usize,
    rng: &mut R,
) -> Vec<WordEntry> {
    select_weighted_words(pool, count, &store.weights(), rng)
}

/// The missed words of a finished session, looked up in `pool` and shuffled.
/// Keys that no longer exist in the pool are dropped; each word appears once
/// even if it was missed more than once.
pub fn retry_words<R: Rng + ?Sized>(
    incorrect: &[String],
    pool: &[WordEntry],
    rng: &mut R,
) -> Vec<WordEntry> {
    let mut words: Vec<WordEntry> = pool
        .iter()
        .filter(|word| incorrect.contains(&word.english))
        .cloned()
        .collect();
    words.shuffle(rng);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;
    use word_data::all_words;

    #[test]
    fn test_batch_is_distinct_and_sized() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let batch = select_weighted_words(all_words(), 15, &WeightTable::default(), &mut rng);
        assert_eq!(batch.len(), 15);
        let keys: BTreeSet<_> = batch.iter().map(|w| w.english.as_str()).collect();
        assert_eq!(keys.len(), 15);
    }

    #[test]
    fn test_small_pool_is_returned_whole() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let pool = word_data::words_by_category("transport");
        let batch = select_weighted_words(&pool, 15, &WeightTable::default(), &mut rng);
        assert_eq!(batch.len(), 4);
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        assert!(select_weighted_words(&[], 15, &WeightTable::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_missed_words_come_back_more_often() {
        let pool = word_data::words_by_category("animals");
        let weights = WeightTable::from_iter([("bear".to_string(), 10.0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let mut bear_first = 0;
        for _ in 0..1000 {
            let batch = select_weighted_words(&pool, 1, &weights, &mut rng);
            if batch[0].english == "bear" {
                bear_first += 1;
            }
        }
        // 10 / 15 of the total weight
        assert!((600..=730).contains(&bear_first), "bear drawn {bear_first} times");
    }

    #[test]
    fn test_retry_words_filters_and_dedups() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let missed = vec![
            "cat".to_string(),
            "unicorn".to_string(),
            "dog".to_string(),
            "cat".to_string(),
        ];
        let words = retry_words(&missed, all_words(), &mut rng);
        let keys: BTreeSet<_> = words.iter().map(|w| w.english.as_str()).collect();
        assert_eq!(words.len(), 2);
        assert_eq!(keys, BTreeSet::from(["cat", "dog"]));
    }
}
