//! The game session: lifecycle, sequencing and history.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    BetState, BoardLayout, DiceMode, EngineConfig, EventRecord, PlayerId, RaceEvent, RaceState,
    RandomSource, Settlement,
};
use crate::error::{ConfigError, SessionError};
use crate::rules::{self, BetConfirmation, MoveOutcome, RollOutcome};

/// Where the session is in its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Start screen. Nothing in progress.
    Idle,
    /// Players are choosing stakes for the next race.
    Betting,
    /// Pieces are moving.
    Racing,
    /// A race just finished.
    Result {
        winner: PlayerId,
        settlement: Option<Settlement>,
    },
}

impl Phase {
    /// The phase without its data.
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::Betting => PhaseKind::Betting,
            Phase::Racing => PhaseKind::Racing,
            Phase::Result { .. } => PhaseKind::Result,
        }
    }
}

/// Phase discriminant, for comparisons and error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Idle,
    Betting,
    Racing,
    Result,
}

/// A play session over any number of races.
///
/// Owns all race and wager state. A front end calls one operation per user
/// action and re-renders from [`GameSession::view`] afterwards. Rejected
/// operations leave the state as it was and update the status message.
///
/// The event history covers the whole session and is only emptied by
/// [`GameSession::clear_history`]. Cloning is cheap: the history is a
/// persistent vector.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: EngineConfig,
    layout: BoardLayout,
    phase: Phase,
    race: RaceState,
    bets: Option<BetState>,
    race_number: u32,
    sequence: u32,
    history: Vector<EventRecord>,
    status: String,
}

/// Builder for creating a GameSession.
pub struct GameSessionBuilder {
    config: EngineConfig,
    tiles: Option<BoardLayout>,
    tile_count: u16,
}

impl Default for GameSessionBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::classic(),
            tiles: None,
            tile_count: 14,
        }
    }
}

impl GameSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dice_mode(mut self, mode: DiceMode) -> Self {
        self.config.dice_mode = mode;
        self
    }

    /// Use the front end's own tile sequence.
    pub fn layout(mut self, layout: BoardLayout) -> Self {
        self.tiles = Some(layout);
        self
    }

    /// Use a plain numbered track of `count` tiles.
    pub fn tile_count(mut self, count: u16) -> Self {
        self.tiles = None;
        self.tile_count = count;
        self
    }

    /// Build the session, validating the board.
    pub fn build(self) -> Result<GameSession, ConfigError> {
        let layout = match self.tiles {
            Some(layout) => layout,
            None => BoardLayout::sequential(self.tile_count)?,
        };
        Ok(GameSession::new(self.config, layout))
    }
}

impl GameSession {
    /// Create an idle session.
    #[must_use]
    pub fn new(config: EngineConfig, layout: BoardLayout) -> Self {
        let bets = config
            .betting
            .as_ref()
            .map(|betting| BetState::new(betting.starting_coins));
        let race = rules::new_race(layout.len());

        info!(
            tiles = layout.len(),
            dice = ?config.dice_mode,
            betting = config.betting_enabled(),
            "session created"
        );

        Self {
            config,
            layout,
            phase: Phase::Idle,
            race,
            bets,
            race_number: 0,
            sequence: 0,
            history: Vector::new(),
            status: "Welcome! Click START".to_string(),
        }
    }

    // === Accessors ===

    /// Variant configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Track layout.
    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Current (or most recent) race.
    #[must_use]
    pub fn race(&self) -> &RaceState {
        &self.race
    }

    /// Wager state, if betting is enabled.
    #[must_use]
    pub fn bets(&self) -> Option<&BetState> {
        self.bets.as_ref()
    }

    /// Races started so far this session.
    #[must_use]
    pub fn race_number(&self) -> u32 {
        self.race_number
    }

    /// Message for the players describing the last thing that happened.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Every event of the session, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    /// Drop every recorded event. Race numbering carries on, so later
    /// records never collide with ones a caller has already stored.
    pub fn clear_history(&mut self) {
        debug!(events = self.history.len(), "history cleared");
        self.history.clear();
    }

    /// Events recorded for one race (including its betting round).
    pub fn race_events(&self, race: u32) -> impl Iterator<Item = &RaceEvent> {
        self.history
            .iter()
            .filter(move |record| record.race == race)
            .map(|record| &record.event)
    }

    /// Winner of the race just finished, while in `Result`.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Result { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// Has a player run out of coins? Always false without betting.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.bets.as_ref().is_some_and(BetState::is_game_over)
    }

    // === Lifecycle ===

    /// Leave the start or result screen and begin the next race.
    ///
    /// With betting enabled this opens a betting round; otherwise the race
    /// starts straight away.
    pub fn start(&mut self) -> Result<PhaseKind, SessionError> {
        self.expect_phase("start", &[PhaseKind::Idle, PhaseKind::Result])?;
        if self.is_game_over() {
            return Err(self.reject(SessionError::SessionOver));
        }

        self.race_number += 1;
        self.sequence = 0;

        match self.bets.as_mut() {
            Some(bets) => {
                rules::begin_round(bets);
                self.phase = Phase::Betting;
                info!(race = self.race_number, "betting opened");
                self.record(RaceEvent::BettingOpened);
            }
            None => self.open_race(),
        }

        Ok(self.phase.kind())
    }

    /// Back to the start screen. The last race stays visible until the
    /// next one starts.
    pub fn go_home(&mut self) {
        debug!(from = ?self.phase.kind(), "returning to start screen");
        self.phase = Phase::Idle;
        self.status = "Welcome! Click START".to_string();
    }

    /// Restore both balances to the starting amount.
    pub fn reset_coins(&mut self) -> Result<(), SessionError> {
        self.expect_phase("reset coins", &[PhaseKind::Idle, PhaseKind::Result])?;
        let Some(betting) = self.config.betting.as_ref() else {
            return Err(self.reject(SessionError::BettingDisabled));
        };

        info!(coins = betting.starting_coins, "balances reset");
        self.bets = Some(BetState::new(betting.starting_coins));
        Ok(())
    }

    fn open_race(&mut self) {
        self.race = rules::new_race(self.layout.len());
        self.phase = Phase::Racing;
        info!(race = self.race_number, tiles = self.layout.len(), "race started");
        self.record(RaceEvent::RaceStarted);
    }

    // === Betting ===

    /// Pick a stake for the player whose turn it is to bet.
    pub fn select_bet(&mut self, amount: u32) -> Result<(), SessionError> {
        self.expect_betting("select a bet")?;
        let Some(bets) = self.bets.as_mut() else {
            return Err(self.reject(SessionError::BettingDisabled));
        };

        let player = bets.bettor();
        if let Err(err) = rules::select_bet(bets, player, amount) {
            return Err(self.reject(err.into()));
        }

        debug!(%player, amount, "bet selected");
        self.record(RaceEvent::BetSelected { player, amount });
        Ok(())
    }

    /// Lock the current selection. The second confirmation starts the race.
    pub fn confirm_bet(&mut self) -> Result<BetConfirmation, SessionError> {
        self.expect_betting("confirm a bet")?;
        let Some(bets) = self.bets.as_mut() else {
            return Err(self.reject(SessionError::BettingDisabled));
        };

        let player = bets.bettor();
        let amount = bets.selection();
        let confirmation = match rules::confirm_bet(bets) {
            Ok(confirmation) => confirmation,
            Err(err) => return Err(self.reject(err.into())),
        };

        let next = match confirmation {
            BetConfirmation::AwaitingNext(next) => Some(next),
            BetConfirmation::AllLocked => None,
        };
        info!(%player, amount, "bet locked");
        self.record(RaceEvent::BetLocked { player, amount, next });

        if confirmation == BetConfirmation::AllLocked {
            self.open_race();
        }
        Ok(confirmation)
    }

    /// Denominations the current bettor can afford. Empty outside betting.
    #[must_use]
    pub fn affordable_bets(&self) -> Vec<u32> {
        match (&self.bets, &self.config.betting) {
            (Some(bets), Some(betting)) if self.phase == Phase::Betting => {
                rules::affordable_bets(bets, bets.bettor(), &betting.denominations)
            }
            _ => Vec::new(),
        }
    }

    // === Racing ===

    /// Throw the dice for the current player.
    pub fn roll_dice(&mut self, rng: &mut impl RandomSource) -> Result<RollOutcome, SessionError> {
        self.expect_phase("roll", &[PhaseKind::Racing])?;

        let player = self.race.current_player();
        let outcome = rules::roll_dice(&mut self.race, rng, self.config.dice_mode);
        let roll = outcome.roll().clone();
        debug!(%player, value = roll.value, "dice rolled");

        self.record(RaceEvent::Rolled { player, roll });
        if let RollOutcome::Forfeited { next, .. } = outcome {
            debug!(%player, %next, "turn forfeited");
            self.record(RaceEvent::Forfeited { player, next });
        }
        Ok(outcome)
    }

    /// Move the current player's piece by the pending roll.
    ///
    /// Ignored when no race is running or nothing is pending.
    pub fn move_piece(&mut self) -> MoveOutcome {
        if self.phase.kind() != PhaseKind::Racing {
            return MoveOutcome::Ignored;
        }

        let outcome = rules::move_piece(&mut self.race);
        match outcome {
            MoveOutcome::Ignored => {}
            MoveOutcome::Advanced { player, from, to, next } => {
                debug!(%player, from, to, "piece moved");
                self.record(RaceEvent::Moved { player, from, to, next });
            }
            MoveOutcome::Won(winner) => self.finish_race(winner),
        }
        outcome
    }

    fn finish_race(&mut self, winner: PlayerId) {
        info!(race = self.race_number, %winner, "race won");
        self.record(RaceEvent::Won { player: winner });

        let payout = self.config.betting.as_ref().map(|betting| betting.payout);
        let settlement = match (self.bets.as_mut(), payout) {
            (Some(bets), Some(payout)) => Some(rules::settle_bet(bets, winner, payout)),
            _ => None,
        };
        if let Some(settlement) = &settlement {
            info!(
                %winner,
                credited = settlement.credited,
                debited = settlement.debited,
                game_over = settlement.game_over,
                "bets settled"
            );
            self.record(RaceEvent::Settled(settlement.clone()));
        }

        self.phase = Phase::Result { winner, settlement };
    }

    // === Helpers ===

    fn record(&mut self, event: RaceEvent) {
        self.status = event.to_string();
        self.history
            .push_back(EventRecord::new(self.race_number, self.sequence, event));
        self.sequence += 1;
    }

    fn reject(&mut self, err: SessionError) -> SessionError {
        warn!(phase = ?self.phase.kind(), error = %err, "action rejected");
        self.status = err.to_string();
        err
    }

    fn expect_phase(&mut self, action: &'static str, allowed: &[PhaseKind]) -> Result<(), SessionError> {
        let actual = self.phase.kind();
        if allowed.contains(&actual) {
            Ok(())
        } else {
            Err(self.reject(SessionError::WrongPhase { action, actual }))
        }
    }

    fn expect_betting(&mut self, action: &'static str) -> Result<(), SessionError> {
        if self.bets.is_none() {
            return Err(self.reject(SessionError::BettingDisabled));
        }
        self.expect_phase(action, &[PhaseKind::Betting])
    }
}
