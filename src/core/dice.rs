//! Dice throws.
//!
//! A `DiceRoll` keeps the individual stick results alongside the total so a
//! front end can draw each stick. Single-die rolls carry no sticks.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::DiceMode;
use super::rng::RandomSource;

/// Number of throwing sticks in four-stick mode.
pub const STICK_COUNT: usize = 4;

/// Faces on the die in single-die mode.
pub const DIE_FACES: u8 = 6;

/// The result of one throw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Mode the throw was made in.
    pub mode: DiceMode,

    /// Total distance rolled.
    pub value: u8,

    /// Per-stick results (marked side up = true). Empty for a die.
    pub sticks: SmallVec<[bool; STICK_COUNT]>,
}

impl DiceRoll {
    /// Throw once in the given mode.
    pub fn throw(mode: DiceMode, rng: &mut impl RandomSource) -> Self {
        match mode {
            DiceMode::FourSticks => {
                let sticks: SmallVec<[bool; STICK_COUNT]> =
                    (0..STICK_COUNT).map(|_| rng.flip()).collect();
                let value = sticks.iter().filter(|&&marked| marked).count() as u8;
                Self { mode, value, sticks }
            }
            DiceMode::SingleDie => Self {
                mode,
                value: rng.roll_die(DIE_FACES),
                sticks: SmallVec::new(),
            },
        }
    }

    /// Does this throw forfeit the turn?
    ///
    /// Only a four-stick throw of zero does; a die never rolls zero.
    #[must_use]
    pub fn forfeits(&self) -> bool {
        self.value == 0
    }
}
