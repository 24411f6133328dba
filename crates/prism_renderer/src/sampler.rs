//! Seeded random sampling.
//!
//! Every bucket owns a [`Sampler`] derived from the render seed and the
//! bucket index, so the random sequence a pixel sees does not depend on how
//! buckets are spread across threads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform `f32` source backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Independent stream `stream` of the sequence rooted at `seed`.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::new(mix_seed(seed, stream))
    }

    /// Uniform value in `[low, high)`. Returns `low` for an empty range.
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if !(low < high) {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.rng.gen()
    }
}

/// SplitMix64 finalizer over the seed and stream index.
fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
