use crate::PseudoRandomNumberGenerator;

/// Returns a random integer in the range `[min, max)`.
///
/// An empty range (`max <= min`) always returns `min` without advancing the generator.
pub fn range(prng: &mut dyn PseudoRandomNumberGenerator, min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    prng.next().rem_euclid(max - min) + min
}
