use alloc::vec::Vec;
use rand::Rng;
use rand::RngExt;

/// Returns a new `Vec` holding the same elements in a uniformly random order.
///
/// Decreasing-index exchange: for each index i from the end down to 1, swap
/// with a uniformly chosen index in `0..=i`, so every permutation is equally
/// likely. The input slice is left untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
