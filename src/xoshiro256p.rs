/*
 * xoshiro256+ implementation
 * https://en.wikipedia.org/wiki/Xorshift#xoshiro256+
 */

use std::time::{SystemTime, UNIX_EPOCH};

fn rol64(x: u64, k: u32) -> u64 {
    (x << k) | (x >> (64 - k))
}

#[derive(Default, Clone, Copy)]
pub struct Xoshiro256pState([u64; 4]);

impl Xoshiro256pState {
    pub fn new(seed: u64) -> Self {
        let mut seed: Splitmix64State = seed;

        Xoshiro256pState([
            splitmix64(&mut seed),
            splitmix64(&mut seed),
            splitmix64(&mut seed),
            splitmix64(&mut seed),
        ])
    }

    /// Seeds from the wall clock, mixed with the pid so two cards started in
    /// the same nanosecond still diverge.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        Self::new(nanos ^ ((std::process::id() as u64) << 32))
    }

    pub fn next(&mut self) -> u64 {
        let res = self.0[0].wrapping_add(self.0[3]);

        let tmp = self.0[1] << 17;

        self.0[2] ^= self.0[0];
        self.0[3] ^= self.0[1];
        self.0[1] ^= self.0[2];
        self.0[0] ^= self.0[3];

        self.0[2] ^= tmp;
        self.0[3] = rol64(self.0[3], 45);

        res
    }

    /// Uniform value in `0..bound`. Draws above the last full multiple of
    /// `bound` are rejected so no index is favoured.
    pub fn below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be non-zero");

        let limit = u64::MAX - u64::MAX % bound;
        loop {
            // low bits of xoshiro256+ are weak, use the top ones
            let x = self.next() >> 11;
            let x = x << 11 | (self.next() >> 53);
            if x < limit {
                return x % bound;
            }
        }
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }

        items.get(self.below(items.len() as u64) as usize)
    }
}

/*
 * splitmix64 used for initialization
 * https://en.wikipedia.org/wiki/Xorshift#Initialization
 */

type Splitmix64State = u64;

fn splitmix64(state: &mut Splitmix64State) -> u64 {
    *state = state.wrapping_add(0x9e3779b97f4a7c15);

    let mut result = *state;
    result = (result ^ (result >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    result = (result ^ (result >> 27)).wrapping_mul(0x94d049bb133111eb);
    result ^ (result >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Xoshiro256pState::new(0xdeadbeef);
        let mut b = Xoshiro256pState::new(0xdeadbeef);

        for _ in 0..64 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = Xoshiro256pState::new(7);

        for bound in 1..20 {
            for _ in 0..200 {
                assert!(rng.below(bound) < bound);
            }
        }
    }

    #[test]
    fn below_is_roughly_uniform() {
        let mut rng = Xoshiro256pState::new(42);
        let mut counts = [0u32; 4];

        for _ in 0..40_000 {
            counts[rng.below(4) as usize] += 1;
        }

        // expected 10_000 each
        for count in counts {
            assert!((9_000..11_000).contains(&count), "skewed: {counts:?}");
        }
    }

    #[test]
    fn pick_on_empty_is_none() {
        let mut rng = Xoshiro256pState::new(1);
        let empty: [u8; 0] = [];

        assert!(rng.pick(&empty).is_none());
    }
}
