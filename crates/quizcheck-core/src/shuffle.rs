//! Presentation-order shuffling.
//!
//! Fisher–Yates: for each index `i` from the last down to 1, swap element `i`
//! with an element drawn uniformly from `[0, i]`. Given a uniform source every
//! permutation is equally likely.

use rand::Rng;

/// Shuffle `items` in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Return a shuffled copy of `items`, leaving the original order intact.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle(&mut copy, rng);
    copy
}
