//! Race rules: rolling, moving, turn order, win detection.
//!
//! Movement is unconditional once a nonzero roll is pending: no captures,
//! no safe tiles, no moving backwards.

use serde::{Deserialize, Serialize};

use crate::core::{DiceMode, DiceRoll, PlayerId, RaceState, RandomSource};

/// Result of a throw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    /// The roll is pending; the same player must now move.
    Rolled(DiceRoll),
    /// A zero throw: the turn passed to `next` and nothing is pending.
    Forfeited { roll: DiceRoll, next: PlayerId },
}

impl RollOutcome {
    /// The throw itself.
    #[must_use]
    pub fn roll(&self) -> &DiceRoll {
        match self {
            RollOutcome::Rolled(roll) | RollOutcome::Forfeited { roll, .. } => roll,
        }
    }
}

/// Result of a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// No roll was pending. Nothing changed.
    Ignored,
    /// The piece advanced and the turn passed to `next`.
    Advanced {
        player: PlayerId,
        from: u32,
        to: u32,
        next: PlayerId,
    },
    /// The roll carried the piece to or past the finish line.
    /// Positions are left where they were.
    Won(PlayerId),
}

/// Start a race: both pieces at 0, no pending roll, player 1 to roll.
///
/// # Panics
///
/// Panics if `board_size` is zero.
#[must_use]
pub fn new_race(board_size: u32) -> RaceState {
    RaceState::new(board_size)
}

/// Throw the dice for the current player.
///
/// A pending roll is overwritten. In four-stick mode a zero throw forfeits
/// the turn immediately.
pub fn roll_dice(state: &mut RaceState, rng: &mut impl RandomSource, mode: DiceMode) -> RollOutcome {
    let roll = DiceRoll::throw(mode, rng);

    if roll.forfeits() {
        state.last_roll = 0;
        switch_player(state);
        return RollOutcome::Forfeited {
            roll,
            next: state.current_player,
        };
    }

    state.last_roll = roll.value;
    RollOutcome::Rolled(roll)
}

/// Move the current player's piece by the pending roll.
pub fn move_piece(state: &mut RaceState) -> MoveOutcome {
    if state.last_roll == 0 {
        return MoveOutcome::Ignored;
    }

    let player = state.current_player;
    let from = state.positions[player];
    let candidate = from + u32::from(state.last_roll);

    if candidate >= state.board_size {
        return MoveOutcome::Won(player);
    }

    state.positions[player] = candidate;
    state.last_roll = 0;
    switch_player(state);

    MoveOutcome::Advanced {
        player,
        from,
        to: candidate,
        next: state.current_player,
    }
}

/// Hand the turn to the other player. Nothing else changes.
pub fn switch_player(state: &mut RaceState) {
    state.current_player = state.current_player.other();
}
