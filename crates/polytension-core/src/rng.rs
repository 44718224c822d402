//! Seeded pseudo-random stream.
//!
//! A string seed is hashed with xmur3 into four 32-bit words, which then seed
//! an sfc32 stream. Every step is defined on wrapping `u32` arithmetic so the
//! output matches any other implementation fed the same seed.

/// xmur3 string hash, used only to expand a seed into stream registers.
#[derive(Debug, Clone)]
struct Xmur3 {
    h: u32,
}

impl Xmur3 {
    /// Hash the seed by UTF-16 code unit.
    fn new(seed: &str) -> Self {
        let units: Vec<u16> = seed.encode_utf16().collect();
        let mut h = 1_779_033_703u32 ^ units.len() as u32;
        for unit in units {
            h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
            h = h.rotate_left(13);
        }
        Self { h }
    }

    fn next_u32(&mut self) -> u32 {
        let mut h = self.h;
        h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
        h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
        h ^= h >> 16;
        self.h = h;
        h
    }
}

/// Deterministic random stream derived from a string seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl SeededRandom {
    /// Create a stream from a seed string.
    pub fn new(seed: &str) -> Self {
        let mut hash = Xmur3::new(seed);
        Self {
            a: hash.next_u32(),
            b: hash.next_u32(),
            c: hash.next_u32(),
            d: hash.next_u32(),
        }
    }

    /// Advance the stream and return the raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        let mut t = self.a.wrapping_add(self.b);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21);
        self.d = self.d.wrapping_add(1);
        t = t.wrapping_add(self.d);
        self.c = self.c.wrapping_add(t);
        t
    }

    /// Advance the stream and return a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_sequence_for_test_seed() {
        let mut rng = SeededRandom::new("test");
        let words: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(words, [1522031828, 861239116, 4126317165, 3456102384]);
    }

    #[test]
    fn test_float_is_word_over_two_pow_32() {
        let mut rng = SeededRandom::new("test");
        assert_eq!(rng.next_f64(), 1522031828.0 / 4294967296.0);
        assert!((rng.next_f64() - 0.20052285771816969).abs() < 1e-15);
    }

    #[test]
    fn test_empty_seed() {
        let mut rng = SeededRandom::new("");
        let words: Vec<u32> = (0..3).map(|_| rng.next_u32()).collect();
        assert_eq!(words, [4129203857, 244752431, 2410192736]);
    }

    #[test]
    fn test_seed_hashed_by_utf16_units() {
        // The emoji is a surrogate pair, so it contributes two code units.
        let mut rng = SeededRandom::new("héllo😀");
        let words: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(words, [2136199565, 3769435850, 2603318889, 377764208]);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<f64> = SeededRandom::new("1700000000000").take(64).collect();
        let b: Vec<f64> = SeededRandom::new("1700000000000").take(64).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a: Vec<u32> = {
            let mut rng = SeededRandom::new("a");
            (0..8).map(|_| rng.next_u32()).collect()
        };
        let b: Vec<u32> = {
            let mut rng = SeededRandom::new("b");
            (0..8).map(|_| rng.next_u32()).collect()
        };
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn test_output_in_unit_interval(seed in ".*", draws in 1usize..256) {
            for value in SeededRandom::new(&seed).take(draws) {
                prop_assert!((0.0..1.0).contains(&value));
            }
        }
    }
}
