//! Error types.
//!
//! Rejections never abort a session: the state is left unchanged and the
//! error's display text doubles as the status message shown to the players.
//! Moving without a pending roll is not an error at all (see
//! `MoveOutcome::Ignored`).

use thiserror::Error;

use crate::core::PlayerId;
use crate::session::PhaseKind;

/// Startup configuration problems. Fatal: the front end cannot run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no board tiles found")]
    EmptyBoard,
    #[error("{player} position {position} is off a {board_size}-tile board")]
    OffBoard {
        player: PlayerId,
        position: u32,
        board_size: u32,
    },
}

/// Rejected wagering actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetError {
    #[error("Not enough coins: {player} has {balance}, bet was {amount}")]
    InsufficientFunds {
        player: PlayerId,
        amount: u32,
        balance: i64,
    },
    #[error("Select a bet first")]
    MissingSelection,
    #[error("{bettor} is choosing a bet, not {player}")]
    NotYourTurn { player: PlayerId, bettor: PlayerId },
}

/// Rejected session-level actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} during {actual:?}")]
    WrongPhase {
        action: &'static str,
        actual: PhaseKind,
    },
    #[error("betting is not enabled for this game")]
    BettingDisabled,
    #[error("GAME OVER: a player has run out of coins")]
    SessionOver,
    #[error(transparent)]
    Bet(#[from] BetError),
}
