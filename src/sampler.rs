
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::numeric::*;

//////////////////////////////////////////////////////////////////////////
/// SAMPLING UTILS
//////////////////////////////////////////////////////////////////////////

/// Uniform samples in [0,1) for one pixel. Seeding with the pixel
/// index keeps renders reproducible no matter how rayon splits work.
pub struct PixelSampler {
    rng: StdRng,
}

impl PixelSampler {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn get_1d(&mut self) -> Float {
        self.rng.random::<Float>()
    }

    pub fn get_2d(&mut self) -> Vector2 {
        Vector2::new(self.get_1d(), self.get_1d())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_in_unit_square() {
        let mut sampler = PixelSampler::new(7);
        for _ in 0..1000 {
            let u = sampler.get_2d();
            assert!((0.0..1.0).contains(&u.x));
            assert!((0.0..1.0).contains(&u.y));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PixelSampler::new(42);
        let mut b = PixelSampler::new(42);
        for _ in 0..16 {
            assert_eq!(a.get_2d(), b.get_2d());
        }
    }
}
