//! Events emitted by the session.
//!
//! Every transition the session performs is recorded as a `RaceEvent`
//! wrapped in an `EventRecord` carrying its race number and sequence. The
//! history is used for:
//! - Status messages (each event's `Display` is what the players read)
//! - Replay/debugging
//! - Rendering transient effects (dice animation, win banner)

use serde::{Deserialize, Serialize};

use super::dice::DiceRoll;
use super::player::PlayerId;
use super::state::Settlement;

/// Something that happened in a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RaceEvent {
    /// A betting round opened; player 1 picks first.
    BettingOpened,

    /// A bet amount was picked but not confirmed.
    BetSelected { player: PlayerId, amount: u32 },

    /// A bet was confirmed. `next` is the player who bets next, if any.
    BetLocked {
        player: PlayerId,
        amount: u32,
        next: Option<PlayerId>,
    },

    /// A race started from the start line.
    RaceStarted,

    /// The current player threw the dice.
    Rolled { player: PlayerId, roll: DiceRoll },

    /// A zero throw cost the player their turn.
    Forfeited { player: PlayerId, next: PlayerId },

    /// A piece advanced and the turn passed.
    Moved {
        player: PlayerId,
        from: u32,
        to: u32,
        next: PlayerId,
    },

    /// A piece crossed the finish line.
    Won { player: PlayerId },

    /// Bets were paid out after a race.
    Settled(Settlement),
}

impl RaceEvent {
    /// The player who acted, if the event has one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            RaceEvent::BetSelected { player, .. }
            | RaceEvent::BetLocked { player, .. }
            | RaceEvent::Rolled { player, .. }
            | RaceEvent::Forfeited { player, .. }
            | RaceEvent::Moved { player, .. }
            | RaceEvent::Won { player } => Some(*player),
            RaceEvent::Settled(settlement) => Some(settlement.winner),
            RaceEvent::BettingOpened | RaceEvent::RaceStarted => None,
        }
    }
}

impl std::fmt::Display for RaceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RaceEvent::BettingOpened => write!(f, "{}: choose your bet", PlayerId::ONE),
            RaceEvent::BetSelected { player, amount } => {
                write!(f, "{player} selected bet {amount}")
            }
            RaceEvent::BetLocked {
                player,
                next: Some(next),
                ..
            } => write!(f, "{player} bet locked. {next}: choose your bet"),
            RaceEvent::BetLocked { player, next: None, .. } => write!(f, "{player} bet locked"),
            RaceEvent::RaceStarted => write!(f, "Race started! {} roll the dice", PlayerId::ONE),
            RaceEvent::Rolled { player, roll } => write!(f, "{player} rolled {}", roll.value),
            RaceEvent::Forfeited { player, next } => {
                write!(f, "{player} rolled 0. {next} turn")
            }
            RaceEvent::Moved { next, .. } => write!(f, "{next} turn"),
            RaceEvent::Won { player } => write!(f, "{player} wins the race!"),
            RaceEvent::Settled(settlement) => write!(f, "{settlement}"),
        }
    }
}

/// A recorded event with its place in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Race number (starts at 1; betting for race `n` is recorded under `n`).
    pub race: u32,

    /// Sequence number within the race (for ordering).
    pub sequence: u32,

    /// What happened.
    pub event: RaceEvent,
}

impl EventRecord {
    /// Create a new event record.
    #[must_use]
    pub fn new(race: u32, sequence: u32, event: RaceEvent) -> Self {
        Self {
            race,
            sequence,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DiceMode;
    use smallvec::SmallVec;

    fn die(value: u8) -> DiceRoll {
        DiceRoll {
            mode: DiceMode::SingleDie,
            value,
            sticks: SmallVec::new(),
        }
    }

    #[test]
    fn test_status_messages() {
        let rolled = RaceEvent::Rolled {
            player: PlayerId::ONE,
            roll: die(6),
        };
        assert_eq!(rolled.to_string(), "Player 1 rolled 6");

        let moved = RaceEvent::Moved {
            player: PlayerId::ONE,
            from: 0,
            to: 6,
            next: PlayerId::TWO,
        };
        assert_eq!(moved.to_string(), "Player 2 turn");

        let forfeited = RaceEvent::Forfeited {
            player: PlayerId::TWO,
            next: PlayerId::ONE,
        };
        assert_eq!(forfeited.to_string(), "Player 2 rolled 0. Player 1 turn");

        assert_eq!(
            RaceEvent::Won { player: PlayerId::TWO }.to_string(),
            "Player 2 wins the race!"
        );
        assert_eq!(RaceEvent::BettingOpened.to_string(), "Player 1: choose your bet");
        assert_eq!(
            RaceEvent::RaceStarted.to_string(),
            "Race started! Player 1 roll the dice"
        );
    }

    #[test]
    fn test_bet_messages() {
        let first = RaceEvent::BetLocked {
            player: PlayerId::ONE,
            amount: 100,
            next: Some(PlayerId::TWO),
        };
        assert_eq!(first.to_string(), "Player 1 bet locked. Player 2: choose your bet");

        let last = RaceEvent::BetLocked {
            player: PlayerId::TWO,
            amount: 50,
            next: None,
        };
        assert_eq!(last.to_string(), "Player 2 bet locked");

        let selected = RaceEvent::BetSelected {
            player: PlayerId::TWO,
            amount: 200,
        };
        assert_eq!(selected.to_string(), "Player 2 selected bet 200");
    }

    #[test]
    fn test_event_player() {
        assert_eq!(RaceEvent::RaceStarted.player(), None);
        assert_eq!(
            RaceEvent::Won { player: PlayerId::TWO }.player(),
            Some(PlayerId::TWO)
        );
    }

    #[test]
    fn test_event_record_serialization() {
        let record = EventRecord::new(
            2,
            3,
            RaceEvent::Rolled {
                player: PlayerId::TWO,
                roll: die(4),
            },
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: EventRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
