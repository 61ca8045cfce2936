//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! The race is strictly two-player. Players are numbered 1 and 2, matching
//! how they are announced to the players ("Player 1 turn").
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`, used for positions, coin
//! balances and bets.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players in a race.
///
/// Only `PlayerId::ONE` and `PlayerId::TWO` exist; the inner value is private
/// so no other identity can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who opens every race and every betting round.
    pub const ONE: PlayerId = PlayerId(1);
    /// The second player.
    pub const TWO: PlayerId = PlayerId(2);

    /// Both players in turn order.
    pub const ALL: [PlayerId; 2] = [PlayerId::ONE, PlayerId::TWO];

    /// Look up a player by number (1 or 2).
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::ONE),
            2 => Some(Self::TWO),
            _ => None,
        }
    }

    /// The player number as displayed (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Zero-based slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The opposing player.
    ///
    /// ```
    /// use ur_race::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::ONE.other(), PlayerId::TWO);
    /// assert_eq!(PlayerId::TWO.other(), PlayerId::ONE);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        match self.0 {
            1 => Self::TWO,
            _ => Self::ONE,
        }
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::ONE
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or_else(|| format!("invalid player number {value}"))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

/// Per-player data for the two players.
///
/// ## Example
///
/// ```
/// use ur_race::core::{PlayerId, PlayerMap};
///
/// let mut coins: PlayerMap<i64> = PlayerMap::with_value(1000);
/// coins[PlayerId::TWO] -= 50;
///
/// assert_eq!(coins[PlayerId::ONE], 1000);
/// assert_eq!(coins[PlayerId::TWO], 950);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a map from explicit values for player 1 and player 2.
    pub const fn from_pair(one: T, two: T) -> Self {
        Self { data: [one, two] }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
