use rand::Rng;
use rand::seq::SliceRandom;
use word_data::WordEntry;

pub const DEFAULT_CHOICE_COUNT: usize = 4;

/// Four shuffled answer options for `correct`: its own answer text plus three
/// others drawn from `pool`.
pub fn generate_choices<R: Rng + ?Sized>(
    correct: &WordEntry,
    pool: &[WordEntry],
    rng: &mut R,
) -> Vec<String> {
    generate_choices_with_count(correct, pool, DEFAULT_CHOICE_COUNT, rng)
}

/// Up to `count` shuffled options, exactly one of which is the answer text of
/// `correct`. Distractors are distinct words other than `correct`; a small pool
/// gives fewer options.
pub fn generate_choices_with_count<R: Rng + ?Sized>(
    correct: &WordEntry,
    pool: &[WordEntry],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let others: Vec<&WordEntry> = pool
        .iter()
        .filter(|word| word.english != correct.english)
        .collect();

    let mut choices = vec![correct.answer_text()];
    choices.extend(
        others
            .choose_multiple(rng, count.saturating_sub(1))
            .map(|word| word.answer_text()),
    );
    choices.shuffle(rng);
    choices
}
