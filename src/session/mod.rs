//! Game session: the engine a front end drives.
//!
//! One `GameSession` runs any of the three variants (classic die, four
//! sticks, betting) depending on its `EngineConfig`:
//!
//! ```text
//! Idle -> Betting (P1 select/confirm, P2 select/confirm) -> Racing -> Result -> Idle
//! ```
//!
//! Without betting the `Betting` phase is skipped.
//!
//! ```
//! use ur_race::core::{PlayerId, ScriptedRng};
//! use ur_race::session::{GameSessionBuilder, PhaseKind};
//!
//! let mut session = GameSessionBuilder::new().tile_count(14).build().unwrap();
//! let mut dice = ScriptedRng::with_faces([6]);
//!
//! assert_eq!(session.start().unwrap(), PhaseKind::Racing);
//! session.roll_dice(&mut dice).unwrap();
//! session.move_piece();
//!
//! assert_eq!(session.race().position(PlayerId::ONE), 6);
//! assert_eq!(session.status(), "Player 2 turn");
//! ```

mod game;
mod view;

pub use game::{GameSession, GameSessionBuilder, Phase, PhaseKind};
pub use view::{SessionView, TileView, WagerView};
