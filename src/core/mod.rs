//! Core types: players, random sources, dice, configuration, state, events.
//!
//! These are plain data. Rules that change them live in `crate::rules`.

pub mod player;
pub mod rng;
pub mod dice;
pub mod config;
pub mod state;
pub mod event;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use dice::{DiceRoll, DIE_FACES, STICK_COUNT};
pub use config::{
    BettingConfig, BoardLayout, DiceMode, EngineConfig, PayoutRule, TileId,
    DEFAULT_DENOMINATIONS, DEFAULT_STARTING_COINS,
};
pub use state::{BetState, RaceState, Settlement};
pub use event::{EventRecord, RaceEvent};
