//! Render-ready snapshot of a session.
//!
//! A front end re-renders everything from a `SessionView` after each call:
//! tiles and their pieces, dice, balances, and the status line. The view owns
//! its data so it can be handed to another thread or serialized to a web UI.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::game::{GameSession, PhaseKind};
use crate::core::{PlayerId, PlayerMap, TileId};

/// One tile of the track and the pieces standing on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    /// Front end's id for this tile.
    pub tile: TileId,
    /// Pieces on the tile, in player order.
    pub occupants: SmallVec<[PlayerId; 2]>,
}

/// Wager panel contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerView {
    pub coins: PlayerMap<i64>,
    pub bets: PlayerMap<u32>,
    pub selection: u32,
    pub bettor: PlayerId,
    /// Denominations the bettor can afford (buttons to enable).
    pub affordable: Vec<u32>,
    pub game_over: bool,
}

/// Everything needed to draw the current screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: PhaseKind,
    pub race_number: u32,
    pub tiles: Vec<TileView>,
    pub positions: PlayerMap<u32>,
    pub current_player: PlayerId,
    pub last_roll: u8,
    pub winner: Option<PlayerId>,
    pub wager: Option<WagerView>,
    pub status: String,
}

impl SessionView {
    /// Capture the session as it is now.
    #[must_use]
    pub fn capture(session: &GameSession) -> Self {
        let race = session.race();

        let tiles = session
            .layout()
            .tiles()
            .iter()
            .enumerate()
            .map(|(position, &tile)| TileView {
                tile,
                occupants: race
                    .positions()
                    .iter()
                    .filter(|&(_, &at)| at as usize == position)
                    .map(|(player, _)| player)
                    .collect(),
            })
            .collect();

        let wager = session.bets().map(|bets| WagerView {
            coins: bets.balances().clone(),
            bets: bets.bets().clone(),
            selection: bets.selection(),
            bettor: bets.bettor(),
            affordable: session.affordable_bets(),
            game_over: bets.is_game_over(),
        });

        Self {
            phase: session.phase().kind(),
            race_number: session.race_number(),
            tiles,
            positions: race.positions().clone(),
            current_player: race.current_player(),
            last_roll: race.last_roll(),
            winner: session.winner(),
            wager,
            status: session.status().to_string(),
        }
    }

    /// Tile a player's piece is drawn on.
    #[must_use]
    pub fn tile_of(&self, player: PlayerId) -> Option<TileId> {
        self.tiles
            .iter()
            .find(|tile| tile.occupants.contains(&player))
            .map(|tile| tile.tile)
    }
}

impl GameSession {
    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView::capture(self)
    }
}
