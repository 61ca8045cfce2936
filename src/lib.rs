//! # ur-race
//!
//! Rules engine for a two-player race on the Royal Game of Ur board, with an
//! optional betting layer. UI-agnostic: a front end drives it one user
//! action at a time and re-renders from the returned state.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: Rules only change the state they are handed and
//!    report what happened. No widgets, no globals.
//!
//! 2. **Injected randomness**: Every roll takes a `RandomSource`, so games
//!    are reproducible from a seed or a script.
//!
//! 3. **Configuration Over Copies**: The classic, four-stick and betting
//!    builds are one engine configured by `EngineConfig`.
//!
//! ## Modules
//!
//! - `core`: Players, random sources, dice, configuration, state, events
//! - `rules`: Race and wagering transitions
//! - `session`: Lifecycle state machine, history and render views
//! - `error`: Rejection and configuration errors

pub mod core;
pub mod rules;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng, GameRngState, RandomSource, ScriptedRng,
    DiceMode, DiceRoll, PayoutRule, BettingConfig, EngineConfig, BoardLayout, TileId,
    RaceState, BetState, Settlement,
    RaceEvent, EventRecord,
};

pub use crate::rules::{BetConfirmation, MoveOutcome, RollOutcome};

pub use crate::session::{GameSession, GameSessionBuilder, Phase, PhaseKind, SessionView};

pub use crate::error::{BetError, ConfigError, SessionError};
