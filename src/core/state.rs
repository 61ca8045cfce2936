//! Race and wager state.
//!
//! ## RaceState
//!
//! One race: both positions, whose turn it is, and the pending roll.
//! Created fresh at race start, discarded when the next race starts.
//!
//! ## BetState
//!
//! Wagering for a whole session: coin balances, locked-in bets, and the
//! amount the current bettor has picked but not yet confirmed.
//!
//! ## Settlement
//!
//! The coins moved when a race's stakes are paid out.
//!
//! All are plain values. The transitions in `crate::rules` mutate them;
//! a front end reads them back (or clones them) to re-render.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use crate::error::ConfigError;

/// State of a single race.
///
/// Deserialization checks the board size and both positions, so a saved
/// race cannot put a piece off the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RaceSnapshot")]
pub struct RaceState {
    pub(crate) positions: PlayerMap<u32>,
    pub(crate) current_player: PlayerId,
    pub(crate) last_roll: u8,
    pub(crate) board_size: u32,
}

impl RaceState {
    /// A race at the start line: both pieces on tile 0, player 1 to roll.
    ///
    /// # Panics
    ///
    /// Panics if `board_size` is zero. Use `BoardLayout` to validate a
    /// front end's board first.
    #[must_use]
    pub fn new(board_size: u32) -> Self {
        assert!(board_size > 0, "Board must have at least 1 tile");

        Self {
            positions: PlayerMap::with_value(0),
            current_player: PlayerId::ONE,
            last_roll: 0,
            board_size,
        }
    }

    /// A race already in progress, with no roll pending.
    ///
    /// Used to resume from a snapshot and to set up test positions.
    ///
    /// # Panics
    ///
    /// Panics if `board_size` is zero or a position is off the board.
    #[must_use]
    pub fn resume(board_size: u32, positions: PlayerMap<u32>, current_player: PlayerId) -> Self {
        let mut state = Self::new(board_size);
        if let Err(err) = check_positions(board_size, &positions) {
            panic!("{err}");
        }
        state.positions = positions;
        state.current_player = current_player;
        state
    }

    /// Position of a player's piece (0-based tile index).
    #[must_use]
    pub fn position(&self, player: PlayerId) -> u32 {
        self.positions[player]
    }

    /// Both positions.
    #[must_use]
    pub fn positions(&self) -> &PlayerMap<u32> {
        &self.positions
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Pending roll, or 0 when the current player must roll.
    #[must_use]
    pub fn last_roll(&self) -> u8 {
        self.last_roll
    }

    /// Is a nonzero roll waiting to be moved?
    #[must_use]
    pub fn has_pending_roll(&self) -> bool {
        self.last_roll > 0
    }

    /// Track length. Reaching this position or beyond wins.
    #[must_use]
    pub fn board_size(&self) -> u32 {
        self.board_size
    }

    /// Tiles a player still has to cover to finish.
    #[must_use]
    pub fn distance_to_finish(&self, player: PlayerId) -> u32 {
        self.board_size - self.positions[player]
    }
}

/// Unchecked wire form of a `RaceState`.
#[derive(Deserialize)]
struct RaceSnapshot {
    positions: PlayerMap<u32>,
    current_player: PlayerId,
    last_roll: u8,
    board_size: u32,
}

impl TryFrom<RaceSnapshot> for RaceState {
    type Error = ConfigError;

    fn try_from(snapshot: RaceSnapshot) -> Result<Self, Self::Error> {
        if snapshot.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        check_positions(snapshot.board_size, &snapshot.positions)?;

        Ok(Self {
            positions: snapshot.positions,
            current_player: snapshot.current_player,
            last_roll: snapshot.last_roll,
            board_size: snapshot.board_size,
        })
    }
}

fn check_positions(board_size: u32, positions: &PlayerMap<u32>) -> Result<(), ConfigError> {
    match positions.iter().find(|&(_, &position)| position >= board_size) {
        Some((player, &position)) => Err(ConfigError::OffBoard {
            player,
            position,
            board_size,
        }),
        None => Ok(()),
    }
}

/// Wagering state for a session.
///
/// ## Values
///
/// Balances are `i64`: a balance may end at or below zero, which is the
/// game-over condition. Bets and the selection are never negative.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BetState {
    pub(crate) coins: PlayerMap<i64>,
    pub(crate) bets: PlayerMap<u32>,
    pub(crate) selection: u32,
    pub(crate) bettor: PlayerId,
}

impl BetState {
    /// Fresh session: both players hold `starting_coins`, nothing staked.
    #[must_use]
    pub fn new(starting_coins: i64) -> Self {
        Self::with_balances(PlayerMap::with_value(starting_coins))
    }

    /// Session with explicit balances and nothing staked.
    #[must_use]
    pub fn with_balances(coins: PlayerMap<i64>) -> Self {
        Self {
            coins,
            bets: PlayerMap::with_value(0),
            selection: 0,
            bettor: PlayerId::ONE,
        }
    }

    /// A player's coin balance.
    #[must_use]
    pub fn coins(&self, player: PlayerId) -> i64 {
        self.coins[player]
    }

    /// Both balances.
    #[must_use]
    pub fn balances(&self) -> &PlayerMap<i64> {
        &self.coins
    }

    /// A player's locked-in bet for the current race (0 if none).
    #[must_use]
    pub fn bet(&self, player: PlayerId) -> u32 {
        self.bets[player]
    }

    /// Both locked-in bets.
    #[must_use]
    pub fn bets(&self) -> &PlayerMap<u32> {
        &self.bets
    }

    /// Amount picked by the current bettor but not yet confirmed.
    #[must_use]
    pub fn selection(&self) -> u32 {
        self.selection
    }

    /// Player whose bet is being chosen.
    #[must_use]
    pub fn bettor(&self) -> PlayerId {
        self.bettor
    }

    /// Has either player run out of coins?
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.coins.iter().any(|(_, &balance)| balance <= 0)
    }
}

/// Coins moved when a race was settled.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settlement {
    /// Race winner.
    pub winner: PlayerId,

    /// Amount added to the winner's balance.
    pub credited: u32,

    /// Amount taken from the loser's balance.
    pub debited: u32,

    /// Balances after settlement.
    pub balances: PlayerMap<i64>,

    /// A balance reached zero or below; no further races.
    pub game_over: bool,
}

impl Settlement {
    /// The player who lost the race.
    #[must_use]
    pub fn loser(&self) -> PlayerId {
        self.winner.other()
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} wins {} coins, {} loses {}",
            self.winner,
            self.credited,
            self.loser(),
            self.debited
        )?;
        if self.game_over {
            write!(f, ". GAME OVER")?;
        }
        Ok(())
    }
}
