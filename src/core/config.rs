//! Engine configuration.
//!
//! The classic, four-stick and betting builds of the game differ only in
//! configuration:
//! - `DiceMode`: how a roll is produced
//! - `BettingConfig`: whether wagering is enabled, and its economy
//! - `BoardLayout`: the ordered track tiles supplied by the front end
//!
//! Everything here derives serde so a front end can ship its variant as a
//! JSON document.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a roll is produced. Fixed per variant, never toggled mid-session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiceMode {
    /// Four binary throwing sticks. Rolls 0-4; a 0 forfeits the turn.
    FourSticks,
    /// One six-sided die. Rolls 1-6; never forfeits.
    #[default]
    SingleDie,
}

impl DiceMode {
    /// Smallest value this mode can roll.
    #[must_use]
    pub const fn min_roll(self) -> u8 {
        match self {
            DiceMode::FourSticks => 0,
            DiceMode::SingleDie => 1,
        }
    }

    /// Largest value this mode can roll.
    #[must_use]
    pub const fn max_roll(self) -> u8 {
        match self {
            DiceMode::FourSticks => 4,
            DiceMode::SingleDie => 6,
        }
    }
}

/// How the winner is paid when a race is settled.
///
/// The two rules differ only when the players staked different amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutRule {
    /// Loser pays their stake to the winner. Coins are conserved.
    #[default]
    LoserStake,
    /// Loser loses their stake, winner gains their own stake.
    /// Coins are not conserved when stakes differ.
    OwnStake,
}

/// Bet denominations offered to players, smallest first.
pub const DEFAULT_DENOMINATIONS: [u32; 9] = [1, 5, 10, 100, 200, 500, 800, 900, 1000];

/// Coins each player starts a session with.
pub const DEFAULT_STARTING_COINS: i64 = 1000;

/// Wagering economy for the betting variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingConfig {
    /// Balance each player starts the session with.
    pub starting_coins: i64,

    /// Bet amounts offered as buttons. Selection itself only checks balance.
    pub denominations: Vec<u32>,

    /// Settlement rule.
    pub payout: PayoutRule,
}

impl Default for BettingConfig {
    fn default() -> Self {
        Self {
            starting_coins: DEFAULT_STARTING_COINS,
            denominations: DEFAULT_DENOMINATIONS.to_vec(),
            payout: PayoutRule::default(),
        }
    }
}

impl BettingConfig {
    /// Set the starting balance.
    #[must_use]
    pub fn with_starting_coins(mut self, coins: i64) -> Self {
        self.starting_coins = coins;
        self
    }

    /// Replace the offered denominations.
    #[must_use]
    pub fn with_denominations(mut self, denominations: impl Into<Vec<u32>>) -> Self {
        self.denominations = denominations.into();
        self
    }

    /// Set the settlement rule.
    #[must_use]
    pub fn with_payout(mut self, payout: PayoutRule) -> Self {
        self.payout = payout;
        self
    }
}

/// Complete variant configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Dice used for every roll.
    pub dice_mode: DiceMode,

    /// Wagering, if this variant has it.
    #[serde(default)]
    pub betting: Option<BettingConfig>,
}

impl EngineConfig {
    /// Single die, no betting.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            dice_mode: DiceMode::SingleDie,
            betting: None,
        }
    }

    /// Four throwing sticks, no betting.
    #[must_use]
    pub fn pro() -> Self {
        Self {
            dice_mode: DiceMode::FourSticks,
            betting: None,
        }
    }

    /// Single die with wagering between races.
    #[must_use]
    pub fn betting() -> Self {
        Self {
            dice_mode: DiceMode::SingleDie,
            betting: Some(BettingConfig::default()),
        }
    }

    /// Set the dice mode.
    #[must_use]
    pub fn with_dice_mode(mut self, mode: DiceMode) -> Self {
        self.dice_mode = mode;
        self
    }

    /// Enable wagering.
    #[must_use]
    pub fn with_betting(mut self, betting: BettingConfig) -> Self {
        self.betting = Some(betting);
        self
    }

    /// Is wagering enabled?
    #[must_use]
    pub fn betting_enabled(&self) -> bool {
        self.betting.is_some()
    }
}

/// Identifier of one track tile, as named by the front end.
///
/// The engine only uses tile order; the id is echoed back in views so the
/// front end can find the widget or sprite to draw on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tile_{}", self.0)
    }
}

/// The race track: tiles in the order pieces travel.
///
/// Position `n` is the `n`th tile; reaching `len()` or beyond wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TileId>", into = "Vec<TileId>")]
pub struct BoardLayout {
    tiles: Vec<TileId>,
}

impl BoardLayout {
    /// Build a layout from the front end's tiles.
    ///
    /// A board with no tiles is a misconfigured front end and is rejected.
    pub fn new(tiles: impl Into<Vec<TileId>>) -> Result<Self, ConfigError> {
        let tiles = tiles.into();
        if tiles.is_empty() {
            return Err(ConfigError::EmptyBoard);
        }
        Ok(Self { tiles })
    }

    /// A layout of `count` tiles numbered `tile_0..tile_{count-1}`.
    pub fn sequential(count: u16) -> Result<Self, ConfigError> {
        Self::new((0..count).map(TileId::new).collect::<Vec<_>>())
    }

    /// Number of tiles, i.e. the board size.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.tiles.len() as u32
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at a track position, if it is on the board.
    #[must_use]
    pub fn tile(&self, position: u32) -> Option<TileId> {
        self.tiles.get(position as usize).copied()
    }

    /// All tiles in track order.
    #[must_use]
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }
}

impl TryFrom<Vec<TileId>> for BoardLayout {
    type Error = ConfigError;

    fn try_from(tiles: Vec<TileId>) -> Result<Self, Self::Error> {
        Self::new(tiles)
    }
}

impl From<BoardLayout> for Vec<TileId> {
    fn from(layout: BoardLayout) -> Self {
        layout.tiles
    }
}
