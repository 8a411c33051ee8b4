use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Random stream used by the initializer and the Markov chain.
pub type IsingRng = Pcg64;

/// Deterministic generator for `Some(seed)`, OS-entropy seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> IsingRng {
    match seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_entropy(),
    }
}
