//! Deterministic xorshift32 random number generator.
//!
//! Every draw mutates the generator in place, so a render is reproducible as
//! long as the same seed and the same sequence of draws are used. The
//! generator is passed by `&mut` to everything that consumes randomness.

use std::num::NonZeroU32;

use rand::{Error, RngCore, SeedableRng};

/// Seed used when none (or zero) is given.
pub const DEFAULT_SEED: u32 = 0x2545_F491;

/// Marsaglia's xorshift32 generator.
///
/// The state is never zero: zero is a fixed point of the shift sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    state: NonZeroU32,
}

impl XorShift32 {
    /// Create a generator from a non-zero seed.
    pub fn new(seed: NonZeroU32) -> Self {
        Self { state: seed }
    }

    /// Create a generator from any seed, replacing zero with [`DEFAULT_SEED`].
    pub fn from_u32(seed: u32) -> Self {
        let seed = NonZeroU32::new(seed)
            .or_else(|| NonZeroU32::new(DEFAULT_SEED))
            .unwrap_or(NonZeroU32::MIN);
        Self::new(seed)
    }

    /// Generator for one image row.
    ///
    /// The row index is hashed into the base seed so that neighbouring rows
    /// start from unrelated states.
    pub fn for_row(seed: u32, row: u32) -> Self {
        Self::from_u32(mix(seed ^ mix(row.wrapping_add(1))))
    }

    /// Current state.
    pub fn state(&self) -> u32 {
        self.state.get()
    }

    /// Advance the state and return it.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state.get();
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        // xorshift maps non-zero states to non-zero states
        self.state = NonZeroU32::new(x).unwrap_or(NonZeroU32::MIN);
        x
    }

    /// Uniform float in [0, 1].
    #[inline]
    pub fn unilateral(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Uniform float in [-1, 1].
    #[inline]
    pub fn bilateral(&mut self) -> f32 {
        -1.0 + 2.0 * self.unilateral()
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::from_u32(DEFAULT_SEED)
    }
}

impl RngCore for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        XorShift32::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = XorShift32::next_u32(self) as u64;
        let hi = XorShift32::next_u32(self) as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = XorShift32::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_u32(u32::from_le_bytes(seed))
    }
}

/// 32-bit integer finaliser (lowbias32).
fn mix(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}
