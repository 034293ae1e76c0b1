//! Seeded random number generation
//!
//! A thin deterministic wrapper around a seeded PRNG: the same seed and the
//! same call sequence always produce the same values, which keeps scene
//! generation reproducible across runs and inside tests.

use nalgebra::{Scalar, Vector2};
use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};

use super::math::{constants::TAU, Vec3};
use crate::geometry::Aabb;

/// Random number generation helper
///
/// Draws come from a [`StdRng`] seeded with the explicit 32-bit seed, so a
/// `Rng` is a pure function of its seed and call sequence.
pub struct Rng {
    /// The seed this generator was constructed with
    pub seed: u32,
    gen: StdRng,
}

impl Rng {
    /// Create a generator from an explicit seed
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            gen: StdRng::seed_from_u64(u64::from(seed)),
        }
    }

    /// Draw a uniform `[0, 1)` value and return whether it fell below
    /// `probability`.
    ///
    /// A probability of 0 or less never passes; 1 or more always passes.
    pub fn test(&mut self, probability: f32) -> bool {
        self.gen.gen::<f32>() < probability
    }

    /// Uniform value in the inclusive range `[a, b]`.
    ///
    /// # Panics
    ///
    /// Panics if `a > b`; that is a caller bug, not a runtime condition.
    pub fn range<T>(&mut self, a: T, b: T) -> T
    where
        T: SampleUniform + PartialOrd + Copy,
    {
        assert!(a <= b, "range requires a <= b");
        self.gen.gen_range(a..=b)
    }

    /// Random vector with each component drawn independently from
    /// `[min, max]`
    pub fn vec(&mut self, min: Vec3, max: Vec3) -> Vec3 {
        Vec3::new(
            self.range(min.x, max.x),
            self.range(min.y, max.y),
            self.range(min.z, max.z),
        )
    }

    /// Random position inside the given bounds
    pub fn vec_in(&mut self, bounds: &Aabb) -> Vec3 {
        self.vec(bounds.min, bounds.max)
    }

    /// Random vector between the origin and `max`
    pub fn vec_to(&mut self, max: Vec3) -> Vec3 {
        self.vec(Vec3::zeros(), max)
    }

    /// Random Euler angles, each axis drawn from `[0, tau)`
    pub fn rotation(&mut self) -> Vec3 {
        Vec3::new(
            self.gen.gen::<f32>() * TAU,
            self.gen.gen::<f32>() * TAU,
            self.gen.gen::<f32>() * TAU,
        )
    }

    /// Random two-component vector with both components drawn from `[a, b]`
    pub fn vec_range<T>(&mut self, a: T, b: T) -> Vector2<T>
    where
        T: SampleUniform + PartialOrd + Copy + Scalar,
    {
        Vector2::new(self.range(a, b), self.range(a, b))
    }

    /// Uniform pick from a list of items.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "choose requires a non-empty slice");
        let index = self.range(0, items.len() - 1);
        &items[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(1234);
        let mut b = Rng::new(1234);
        for _ in 0..64 {
            assert_eq!(a.range(0u32, 1000), b.range(0u32, 1000));
            assert_eq!(a.range(-1.0f32, 1.0), b.range(-1.0f32, 1.0));
            assert_eq!(a.rotation(), b.rotation());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Rng::new(1);
        let mut b = Rng::new(2);
        let seq_a: Vec<u32> = (0..16).map(|_| a.range(0, 1_000_000)).collect();
        let seq_b: Vec<u32> = (0..16).map(|_| b.range(0, 1_000_000)).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_probability_boundaries() {
        let mut rng = Rng::new(7);
        for _ in 0..100 {
            assert!(!rng.test(0.0));
            assert!(rng.test(1.0));
        }
    }

    #[test]
    fn range_is_inclusive_and_bounded() {
        let mut rng = Rng::new(99);
        for _ in 0..200 {
            let v = rng.range(3, 5);
            assert!((3..=5).contains(&v));
        }
        assert_eq!(rng.range(4, 4), 4);
    }

    #[test]
    #[should_panic(expected = "range requires a <= b")]
    fn inverted_range_panics() {
        let mut rng = Rng::new(0);
        let _ = rng.range(5, 3);
    }

    #[test]
    fn vec_respects_bounds() {
        let mut rng = Rng::new(11);
        let min = Vec3::new(-2.0, 0.0, 1.0);
        let max = Vec3::new(2.0, 0.5, 4.0);
        for _ in 0..100 {
            let v = rng.vec(min, max);
            assert!(v.x >= min.x && v.x <= max.x);
            assert!(v.y >= min.y && v.y <= max.y);
            assert!(v.z >= min.z && v.z <= max.z);
        }
    }

    #[test]
    fn rotation_stays_in_full_turn() {
        let mut rng = Rng::new(21);
        for _ in 0..100 {
            let r = rng.rotation();
            for angle in [r.x, r.y, r.z] {
                assert!((0.0..TAU).contains(&angle));
            }
        }
    }

    #[test]
    fn choose_covers_all_items() {
        let mut rng = Rng::new(5);
        let items = ["a", "b", "c"];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(*rng.choose(&items));
        }
        assert_eq!(seen.len(), items.len());
    }

    #[test]
    #[should_panic(expected = "non-empty")]
    fn choose_from_empty_panics() {
        let mut rng = Rng::new(0);
        let empty: [u32; 0] = [];
        let _ = rng.choose(&empty);
    }
}
