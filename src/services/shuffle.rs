//! Fisher–Yates permutation and partial Fisher–Yates sampling.

use rand::Rng;

/// Shuffle `items` in place; every ordering is equally likely.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Take `k` items uniformly at random without replacement.
///
/// Every `k`-subset is equally likely; the order of the result is random too.
/// Returns all items (shuffled) when `k` exceeds the length.
///
/// Same algorithm as `SliceRandom::partial_shuffle`, but the picked items are
/// kept at the front and returned by value.
pub fn sample<T, R>(mut items: Vec<T>, k: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let n = items.len();
    let k = k.min(n);
    for i in 0..k {
        let j = rng.random_range(i..n);
        items.swap(i, j);
    }
    items.truncate(k);
    items
}
