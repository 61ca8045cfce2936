//! Random sources for dice rolls.
//!
//! The engine never owns a random number generator. Every roll takes a
//! `&mut impl RandomSource` supplied by the caller, so outcomes can be seeded
//! or scripted.
//!
//! - `GameRng`: seeded ChaCha8 generator with serializable state.
//! - `ScriptedRng`: replays fixed die faces and stick results.
//!
//! ```
//! use ur_race::core::{GameRng, RandomSource};
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! // Same seed, same rolls
//! assert_eq!(rng1.roll_die(6), rng2.roll_die(6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A uniform source of randomness for the dice.
pub trait RandomSource {
    /// One uniform binary draw (a throwing stick landing marked side up).
    fn flip(&mut self) -> bool;

    /// A uniform integer in `1..=faces`.
    fn roll_die(&mut self, faces: u8) -> u8;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn flip(&mut self) -> bool {
        (**self).flip()
    }

    fn roll_die(&mut self, faces: u8) -> u8 {
        (**self).roll_die(faces)
    }
}

/// Deterministic RNG for real play.
///
/// Uses ChaCha8 so a seed reproduces the same game on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    fn roll_die(&mut self, faces: u8) -> u8 {
        self.inner.gen_range(1..=faces)
    }
}

/// Serializable RNG state for replaying a session from a checkpoint.
///
/// Uses the ChaCha8 word position, so capture and restore are O(1)
/// regardless of how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed script of die faces and stick results.
///
/// Intended for tests and tutorials where the roll sequence must be known.
///
/// # Panics
///
/// Panics when asked for a value after its script is exhausted, or when a
/// scripted face does not fit the requested die.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    faces: VecDeque<u8>,
    sticks: VecDeque<bool>,
}

impl ScriptedRng {
    /// Script for single-die rolls, in order.
    pub fn with_faces(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            sticks: VecDeque::new(),
        }
    }

    /// Script for individual stick draws, in order.
    pub fn with_sticks(sticks: impl IntoIterator<Item = bool>) -> Self {
        Self {
            faces: VecDeque::new(),
            sticks: sticks.into_iter().collect(),
        }
    }

    /// Script for four-stick throws given as totals.
    ///
    /// A total of `n` is expanded to `n` marked sticks followed by
    /// `4 - n` blank ones.
    pub fn with_stick_totals(totals: impl IntoIterator<Item = u8>) -> Self {
        let sticks = totals
            .into_iter()
            .flat_map(|total| {
                assert!(total <= 4, "four sticks cannot total {total}");
                (0..4u8).map(move |i| i < total)
            })
            .collect();
        Self {
            faces: VecDeque::new(),
            sticks,
        }
    }

    /// Remaining scripted values (faces, sticks).
    #[must_use]
    pub fn remaining(&self) -> (usize, usize) {
        (self.faces.len(), self.sticks.len())
    }
}

impl RandomSource for ScriptedRng {
    fn flip(&mut self) -> bool {
        match self.sticks.pop_front() {
            Some(stick) => stick,
            None => panic!("scripted stick draws exhausted"),
        }
    }

    fn roll_die(&mut self, faces: u8) -> u8 {
        match self.faces.pop_front() {
            Some(face) => {
                assert!(
                    (1..=faces).contains(&face),
                    "scripted face {face} is not on a {faces}-sided die"
                );
                face
            }
            None => panic!("scripted die faces exhausted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(6), rng2.roll_die(6));
            assert_eq!(rng1.flip(), rng2.flip());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll_die(6)).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll_die(6)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_die_covers_all_faces() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 6];

        for _ in 0..600 {
            let face = rng.roll_die(6);
            assert!((1..=6).contains(&face));
            seen[usize::from(face - 1)] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_flip_is_roughly_fair() {
        let mut rng = GameRng::new(99);
        let heads = (0..10_000).filter(|_| rng.flip()).count();

        assert!((4_500..5_500).contains(&heads), "got {heads} heads");
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            rng.roll_die(6);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_die(6)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_die(6)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_faces() {
        let mut rng = ScriptedRng::with_faces([6, 3]);

        assert_eq!(rng.roll_die(6), 6);
        assert_eq!(rng.roll_die(6), 3);
        assert_eq!(rng.remaining(), (0, 0));
    }

    #[test]
    fn test_scripted_stick_totals() {
        let mut rng = ScriptedRng::with_stick_totals([2, 0]);

        let first: Vec<_> = (0..4).map(|_| rng.flip()).collect();
        assert_eq!(first, vec![true, true, false, false]);

        let second: Vec<_> = (0..4).map(|_| rng.flip()).collect();
        assert_eq!(second, vec![false; 4]);
    }

    #[test]
    #[should_panic(expected = "scripted die faces exhausted")]
    fn test_scripted_exhausted() {
        let mut rng = ScriptedRng::with_faces([]);
        rng.roll_die(6);
    }

    #[test]
    #[should_panic(expected = "is not on a 6-sided die")]
    fn test_scripted_face_out_of_range() {
        let mut rng = ScriptedRng::with_faces([7]);
        rng.roll_die(6);
    }

    #[test]
    fn test_mut_ref_is_a_source() {
        fn roll(mut source: impl RandomSource) -> u8 {
            source.roll_die(6)
        }

        let mut rng = ScriptedRng::with_faces([4, 5]);
        assert_eq!(roll(&mut rng), 4);
        assert_eq!(roll(&mut rng), 5);
    }
}
