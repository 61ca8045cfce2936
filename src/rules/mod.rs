//! Game rules as state transitions.
//!
//! - `race`: roll, move, turn order and win detection on a `RaceState`
//! - `betting`: stake selection, confirmation and settlement on a `BetState`
//!
//! Each function changes only the state it is given and reports what
//! happened. Sequencing (which transition is allowed when) belongs to
//! `crate::session`.

pub mod race;
pub mod betting;

pub use race::{move_piece, new_race, roll_dice, switch_player, MoveOutcome, RollOutcome};
pub use betting::{
    affordable_bets, begin_round, confirm_bet, select_bet, settle_bet, BetConfirmation,
};
