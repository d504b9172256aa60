//! Helpers over the single shared RNG threaded through every stage.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// Uniform integer in `[min, max_exclusive)`.
pub(super) fn range_i32(rng: &mut ChaCha8Rng, min: i32, max_exclusive: i32) -> i32 {
    debug_assert!(min < max_exclusive);
    let span = (max_exclusive - min) as u64;
    min + (rng.next_u64() % span) as i32
}

/// Uniform roll in `[0, 100]`, matching inclusive percent comparisons.
pub(super) fn percent_roll(rng: &mut ChaCha8Rng) -> i32 {
    range_i32(rng, 0, 101)
}

/// Uniform float in `[0, 1)` built from the high bits of one draw.
pub(super) fn unit_f32(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u64() >> 40) as f32 / (1u64 << 24) as f32
}

pub(super) fn choose<'a, T>(rng: &mut ChaCha8Rng, slice: &'a [T]) -> &'a T {
    &slice[range_i32(rng, 0, slice.len() as i32) as usize]
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn range_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for _ in 0..200 {
            let value = range_i32(&mut rng, 9, 18);
            assert!((9..18).contains(&value));
        }
    }

    #[test]
    fn percent_roll_can_reach_both_ends() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..10_000 {
            let roll = percent_roll(&mut rng);
            assert!((0..=100).contains(&roll));
            seen_low |= roll <= 5;
            seen_high |= roll >= 95;
        }
        assert!(seen_low && seen_high, "10k rolls should cover both tails");
    }

    #[test]
    fn unit_float_is_half_open() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..1_000 {
            let value = unit_f32(&mut rng);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn choose_is_deterministic_for_a_fixed_seed() {
        let options = ["a", "b", "c", "d"];
        let mut first = ChaCha8Rng::seed_from_u64(42);
        let mut second = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(choose(&mut first, &options), choose(&mut second, &options));
        }
    }
}
