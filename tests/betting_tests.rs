//! Betting variant: multi-race sessions, rejections and game over.

use ur_race::core::{BettingConfig, EngineConfig, PayoutRule, PlayerId, PlayerMap, RaceEvent, ScriptedRng};
use ur_race::error::{BetError, SessionError};
use ur_race::rules::BetConfirmation;
use ur_race::session::{GameSession, GameSessionBuilder, Phase, PhaseKind};

fn betting_session(config: BettingConfig) -> GameSession {
    GameSessionBuilder::new()
        .config(EngineConfig::classic().with_betting(config))
        .tile_count(5)
        .build()
        .unwrap()
}

/// Place both bets and let `winner` cross the line on a 5-tile board.
fn play_race(session: &mut GameSession, stakes: (u32, u32), winner: PlayerId) {
    session.start().unwrap();
    session.select_bet(stakes.0).unwrap();
    session.confirm_bet().unwrap();
    session.select_bet(stakes.1).unwrap();
    session.confirm_bet().unwrap();

    let faces: Vec<u8> = if winner == PlayerId::ONE {
        vec![6]
    } else {
        // Player 1 creeps forward, player 2 finishes
        vec![1, 6]
    };
    let mut rng = ScriptedRng::with_faces(faces);
    while session.phase() == &Phase::Racing {
        session.roll_dice(&mut rng).unwrap();
        session.move_piece();
    }
    assert_eq!(session.winner(), Some(winner));
}

/// Confirming player 1's bet hands the choice to player 2; no race yet.
#[test]
fn test_first_confirmation_waits_for_second() {
    let mut session = betting_session(BettingConfig::default());
    session.start().unwrap();

    session.select_bet(10).unwrap();
    assert_eq!(
        session.confirm_bet(),
        Ok(BetConfirmation::AwaitingNext(PlayerId::TWO))
    );

    assert_eq!(session.phase(), &Phase::Betting);
    assert_eq!(session.bets().unwrap().bettor(), PlayerId::TWO);
    assert_eq!(session.status(), "Player 1 bet locked. Player 2: choose your bet");
}

/// Confirming player 2's bet starts a fresh race.
#[test]
fn test_second_confirmation_starts_race() {
    let mut session = betting_session(BettingConfig::default());
    session.start().unwrap();
    session.select_bet(10).unwrap();
    session.confirm_bet().unwrap();
    session.select_bet(5).unwrap();

    assert_eq!(session.confirm_bet(), Ok(BetConfirmation::AllLocked));

    assert_eq!(session.phase(), &Phase::Racing);
    assert_eq!(session.race().positions(), &PlayerMap::from_pair(0, 0));
    assert_eq!(session.race().current_player(), PlayerId::ONE);
    assert_eq!(session.bets().unwrap().bets(), &PlayerMap::from_pair(10, 5));
    assert_eq!(session.status(), "Race started! Player 1 roll the dice");
}

/// Over-balance selection is rejected and leaves everything as it was.
#[test]
fn test_over_balance_selection() {
    let mut session = betting_session(BettingConfig::default().with_starting_coins(150));
    session.start().unwrap();
    session.select_bet(100).unwrap();
    let before = session.bets().cloned();

    let err = session.select_bet(200).unwrap_err();

    assert_eq!(
        err,
        SessionError::Bet(BetError::InsufficientFunds {
            player: PlayerId::ONE,
            amount: 200,
            balance: 150,
        })
    );
    assert_eq!(session.bets().cloned(), before);
    assert!(session.status().starts_with("Not enough coins"));
}

/// Balances persist across races; stakes reset each round.
#[test]
fn test_balances_carry_over() {
    let mut session = betting_session(BettingConfig::default());

    play_race(&mut session, (100, 50), PlayerId::ONE);
    assert_eq!(session.bets().unwrap().balances(), &PlayerMap::from_pair(1050, 950));

    session.start().unwrap();
    assert_eq!(session.bets().unwrap().bets(), &PlayerMap::from_pair(0, 0));
    assert_eq!(session.bets().unwrap().bettor(), PlayerId::ONE);
    session.go_home();

    play_race(&mut session, (200, 300), PlayerId::TWO);
    assert_eq!(session.bets().unwrap().balances(), &PlayerMap::from_pair(850, 1150));
    assert_eq!(session.race_number(), 3);
}

/// The literal source payout credits the winner's own stake.
#[test]
fn test_own_stake_rule() {
    let mut session = betting_session(BettingConfig::default().with_payout(PayoutRule::OwnStake));

    play_race(&mut session, (100, 50), PlayerId::ONE);

    assert_eq!(session.bets().unwrap().balances(), &PlayerMap::from_pair(1100, 950));
}

/// Losing everything ends the session.
#[test]
fn test_game_over() {
    let mut session = betting_session(BettingConfig::default().with_starting_coins(100));

    play_race(&mut session, (10, 100), PlayerId::ONE);

    assert!(session.is_game_over());
    assert!(session.view().wager.unwrap().game_over);
    assert!(session.status().ends_with("GAME OVER"));
    assert_eq!(session.start(), Err(SessionError::SessionOver));
    assert_eq!(session.phase().kind(), PhaseKind::Result);
}

/// Affordable denominations follow the current bettor's balance.
#[test]
fn test_affordable_bets_follow_bettor() {
    let mut session = betting_session(BettingConfig::default().with_starting_coins(1000));

    play_race(&mut session, (10, 900), PlayerId::ONE);
    // Player 2 now has 100 coins
    session.start().unwrap();
    assert_eq!(session.affordable_bets().len(), 9);

    session.select_bet(1).unwrap();
    session.confirm_bet().unwrap();
    assert_eq!(session.affordable_bets(), vec![1, 5, 10, 100]);
}

/// Every betting action lands in the history under its race number.
#[test]
fn test_history_records_betting() {
    let mut session = betting_session(BettingConfig::default());

    play_race(&mut session, (100, 50), PlayerId::ONE);

    let events: Vec<_> = session.race_events(1).cloned().collect();
    assert_eq!(events[0], RaceEvent::BettingOpened);
    assert_eq!(
        events[1],
        RaceEvent::BetSelected {
            player: PlayerId::ONE,
            amount: 100,
        }
    );
    assert!(events.contains(&RaceEvent::RaceStarted));
    assert!(matches!(events.last(), Some(RaceEvent::Settled(s)) if s.winner == PlayerId::ONE));

    let sequences: Vec<_> = session.history().iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (0..sequences.len() as u32).collect::<Vec<_>>());
}
