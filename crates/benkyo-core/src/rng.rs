// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, completely insecure PRNG (mulberry32) used to derive stable
/// collection orderings from a stored seed.
///
/// Outputs are a pure function of (seed, call count). The stream must match
/// the canonical JavaScript mulberry32 bit-for-bit, `Math.imul` wraparound
/// included, so that a persisted seed keeps reproducing the same ordering
/// everywhere, forever.
pub struct Mulberry32 {
    state: u32,
}

const INCREMENT: u32 = 0x6D2B79F5;

impl Mulberry32 {
    /// Initialize the RNG from a seed. Every u32 is a valid seed.
    pub fn from_seed(seed: u32) -> Self {
        Self { state: seed }
    }

    /// The next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        ((t ^ (t >> 14)) as f64) / 4294967296.0
    }
}

/// A deterministic permutation of `0..n` under the given seed.
///
/// Fisher-Yates, iterating `i` from `n - 1` down to `1` and drawing
/// `j = floor(rng() * (i + 1))` at each step. The descending draw order is
/// part of the contract: changing it would silently reorder every collection
/// with a persisted seed.
pub fn permute(n: usize, seed: u32) -> Vec<usize> {
    let mut rng = Mulberry32::from_seed(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = (rng.next_f64() * (i as f64 + 1.0)) as usize;
        indices.swap(i, j);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First draws for seed 12345, from the JavaScript reference.
    #[test]
    fn test_known_draws() {
        let mut rng = Mulberry32::from_seed(12345);
        let expected = [
            0.9797282677609473,
            0.3067522644996643,
            0.484205421525985,
            0.817934412509203,
        ];
        for value in expected {
            assert_eq!(rng.next_f64(), value);
        }
    }

    #[test]
    fn test_draws_are_in_unit_interval() {
        for seed in [0, 1, 42, u32::MAX] {
            let mut rng = Mulberry32::from_seed(seed);
            for _ in 0..1000 {
                let value = rng.next_f64();
                assert!((0.0..1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Mulberry32::from_seed(2026);
        let mut b = Mulberry32::from_seed(2026);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    /// Permutations for seed 12345, from the JavaScript reference.
    #[test]
    fn test_known_permutations() {
        assert_eq!(permute(5, 12345), vec![0, 2, 3, 1, 4]);
        assert_eq!(permute(8, 12345), vec![3, 0, 1, 5, 4, 6, 2, 7]);
        assert_eq!(permute(10, 2026), vec![6, 7, 3, 8, 1, 0, 9, 5, 2, 4]);
    }

    #[test]
    fn test_permutation_is_a_bijection() {
        for n in 0..64 {
            let mut perm = permute(n, 2026);
            perm.sort_unstable();
            let identity: Vec<usize> = (0..n).collect();
            assert_eq!(perm, identity);
        }
    }

    #[test]
    fn test_trivial_lengths() {
        assert_eq!(permute(0, 42), Vec::<usize>::new());
        assert_eq!(permute(1, 42), vec![0]);
    }

    #[test]
    fn test_permutation_is_deterministic() {
        assert_eq!(permute(100, 7), permute(100, 7));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_eq!(permute(5, 42), vec![0, 4, 2, 1, 3]);
        assert_eq!(permute(5, 43), vec![2, 0, 3, 1, 4]);
        assert_ne!(permute(5, 42), permute(5, 43));
    }
}
