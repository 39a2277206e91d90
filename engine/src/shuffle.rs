//! In-place Fisher–Yates shuffle.

use rand::Rng;

/// Shuffle `items` in place into a uniformly random permutation.
///
/// Walks from the last index down to 1 and swaps each element with one picked
/// uniformly from `[0, i]`. Sequences of length 0 or 1 are left untouched.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle using the thread-local RNG.
pub fn shuffle_thread<T>(items: &mut [T]) {
    shuffle(items, &mut rand::thread_rng());
}
