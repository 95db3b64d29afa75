pub mod rand_util;

use serde::{
    Deserialize,
    Serialize,
};

/// The seed of a [`PseudoRandomNumberGenerator`].
///
/// A seed is four 16-bit words, most significant first, which together form the 64-bit state of
/// the generator. Seeds serialize as a plain array of four integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrngSeed(pub [u16; 4]);

impl PrngSeed {
    /// Creates a seed from its four words.
    pub const fn new(words: [u16; 4]) -> Self {
        Self(words)
    }

    /// Creates a seed from a 64-bit generator state.
    pub fn from_state(state: u64) -> Self {
        Self([
            (state >> 48) as u16,
            (state >> 32) as u16,
            (state >> 16) as u16,
            state as u16,
        ])
    }

    /// The 64-bit generator state described by the seed.
    pub fn state(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |state, word| (state << 16) | *word as u64)
    }

    /// The four words of the seed.
    pub fn words(&self) -> [u16; 4] {
        self.0
    }

    /// Generates a new random seed.
    #[cfg(feature = "std")]
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        Self::from_state(rng.random())
    }
}

impl From<[u16; 4]> for PrngSeed {
    fn from(value: [u16; 4]) -> Self {
        Self(value)
    }
}

/// A pseudo-random number generator, created with the intention of using a random number generator
/// that can be deterministically "replayed" for battle simulations.
pub trait PseudoRandomNumberGenerator: Send + Sync {
    /// Returns the initial seed the generator was created with.
    ///
    /// The initial seed can be used to replay the random number generation sequence.
    fn initial_seed(&self) -> PrngSeed;

    /// Returns the current seed, which can be used to resume the sequence from this point.
    fn seed(&self) -> PrngSeed;

    /// Returns the next integer in the sequence.
    fn next(&mut self) -> u64;
}

/// A real implementation of [`PseudoRandomNumberGenerator`].
pub struct RealPseudoRandomNumberGenerator {
    initial_seed: PrngSeed,
    state: u64,
}

impl RealPseudoRandomNumberGenerator {
    /// Creates a new random number generator.
    ///
    /// If two random number generators are created with the same seed, their output should be
    /// exactly the same.
    pub fn new(seed: PrngSeed) -> Self {
        Self {
            initial_seed: seed,
            state: seed.state(),
        }
    }

    /// Linear Congruential Generator (LCRNG).
    fn next_state(state: u64) -> u64 {
        // Constants in the generation V and VI games.
        const A: u64 = 0x5D588B656C078965;
        const C: u64 = 0x0000000000269EC3;
        state.wrapping_mul(A).wrapping_add(C)
    }
}

impl PseudoRandomNumberGenerator for RealPseudoRandomNumberGenerator {
    fn initial_seed(&self) -> PrngSeed {
        self.initial_seed
    }

    fn seed(&self) -> PrngSeed {
        PrngSeed::from_state(self.state)
    }

    fn next(&mut self) -> u64 {
        self.state = Self::next_state(self.state);
        // Use the upper 32 bits. The lower ones are predictable in some situations.
        self.state >> 32
    }
}
