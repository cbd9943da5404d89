//! Benchmarking helpers for Lanai.
//!
//! Deterministic word generation so benchmark runs are comparable.

/// Generate `count` pseudo-random lowercase words of 3 to 12 characters.
///
/// The same `seed` always yields the same list.
pub fn generate_words(count: usize, seed: u64) -> Vec<String> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|_| {
            let len = rng.usize(3..=12);
            (0..len).map(|_| rng.lowercase()).collect()
        })
        .collect()
}
