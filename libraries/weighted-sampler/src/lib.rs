//! Weighted random sampling without replacement.
//!
//! Items are drawn one at a time with probability proportional to their
//! weight among the items that have not been drawn yet. All randomness comes
//! from the caller's RNG, so a seeded RNG gives reproducible samples.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use weighted_sampler::sample_weighted;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let items = vec![("common", 1.0), ("rare", 0.1), ("hard", 5.0)];
//!
//! let sampled = sample_weighted(items, 2, |(_, weight)| *weight, &mut rng);
//! assert_eq!(sampled.len(), 2);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw up to `count` items without replacement, each step picking among the
/// remaining items with probability proportional to `weight_fn`.
///
/// The result is in draw order and has `min(count, items.len())` entries,
/// unless the remaining weight runs out first: negative, NaN and infinite
/// weights count as zero, and once only zero-weight items remain sampling
/// stops early.
///
/// Each step draws a uniform value in `[0, total)` and walks the remaining
/// items, accumulating weight until the running total exceeds the draw.
pub fn sample_weighted<T, R, F>(items: Vec<T>, count: usize, weight_fn: F, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    let mut remaining: Vec<(T, f64)> = items
        .into_iter()
        .map(|item| {
            let weight = sanitize_weight(weight_fn(&item));
            (item, weight)
        })
        .collect();

    let draws = count.min(remaining.len());
    let mut selected = Vec::with_capacity(draws);

    for _ in 0..draws {
        let total: f64 = remaining.iter().map(|(_, weight)| weight).sum();
        if total <= 0.0 {
            break;
        }

        let target = rng.gen::<f64>() * total;
        let Some(index) = pick_index(&remaining, target) else {
            break;
        };

        let (item, _) = remaining.remove(index);
        selected.push(item);
    }

    selected
}

/// Like [`sample_weighted`], but the result is shuffled afterwards so its
/// order carries no information about the draw order.
pub fn sample_weighted_shuffled<T, R, F>(
    items: Vec<T>,
    count: usize,
    weight_fn: F,
    rng: &mut R,
) -> Vec<T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    let mut selected = sample_weighted(items, count, weight_fn, rng);
    selected.shuffle(rng);
    selected
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

fn pick_index<T>(remaining: &[(T, f64)], target: f64) -> Option<usize> {
    let mut running = 0.0;
    for (index, (_, weight)) in remaining.iter().enumerate() {
        running += weight;
        if running > target {
            return Some(index);
        }
    }
    // Rounding can leave the running total a hair below the draw; fall back to
    // the last item that could have been drawn at all.
    remaining.iter().rposition(|(_, weight)| *weight > 0.0)
}
