//! Wagering rules.
//!
//! A betting round runs before every race: player 1 picks and confirms a
//! stake, then player 2. Confirming the second stake starts the race.
//! After the race the stakes are settled by the configured `PayoutRule`.

use serde::{Deserialize, Serialize};

use crate::core::{BetState, PayoutRule, PlayerId, PlayerMap, Settlement};
use crate::error::BetError;

/// Result of a successful bet confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetConfirmation {
    /// Stake locked; `next` must now choose.
    AwaitingNext(PlayerId),
    /// Both stakes are locked. The race can start.
    AllLocked,
}

/// Open a betting round: stakes and selection cleared, player 1 first.
/// Balances carry over.
pub fn begin_round(bets: &mut BetState) {
    bets.bets = PlayerMap::with_value(0);
    bets.selection = 0;
    bets.bettor = PlayerId::ONE;
}

/// Pick a stake for `player` without committing it.
///
/// Only the current bettor may pick, since the selection is what
/// `confirm_bet` locks in for them. Picking 0 clears the selection.
pub fn select_bet(bets: &mut BetState, player: PlayerId, amount: u32) -> Result<(), BetError> {
    if player != bets.bettor {
        return Err(BetError::NotYourTurn {
            player,
            bettor: bets.bettor,
        });
    }

    let balance = bets.coins[player];
    if i64::from(amount) > balance {
        return Err(BetError::InsufficientFunds {
            player,
            amount,
            balance,
        });
    }

    bets.selection = amount;
    Ok(())
}

/// Lock the current bettor's selection and pass the choice on.
pub fn confirm_bet(bets: &mut BetState) -> Result<BetConfirmation, BetError> {
    if bets.selection == 0 {
        return Err(BetError::MissingSelection);
    }

    let player = bets.bettor;
    bets.bets[player] = bets.selection;
    bets.selection = 0;

    if player == PlayerId::ONE {
        bets.bettor = PlayerId::TWO;
        Ok(BetConfirmation::AwaitingNext(PlayerId::TWO))
    } else {
        bets.bettor = PlayerId::ONE;
        Ok(BetConfirmation::AllLocked)
    }
}

/// Pay out the locked stakes for a finished race.
pub fn settle_bet(bets: &mut BetState, winner: PlayerId, rule: PayoutRule) -> Settlement {
    let loser = winner.other();
    let debited = bets.bets[loser];
    let credited = match rule {
        PayoutRule::LoserStake => debited,
        PayoutRule::OwnStake => bets.bets[winner],
    };

    bets.coins[loser] -= i64::from(debited);
    bets.coins[winner] += i64::from(credited);

    Settlement {
        winner,
        credited,
        debited,
        balances: bets.coins.clone(),
        game_over: bets.is_game_over(),
    }
}

/// Offered denominations the player can currently afford, smallest first.
#[must_use]
pub fn affordable_bets(bets: &BetState, player: PlayerId, denominations: &[u32]) -> Vec<u32> {
    let balance = bets.coins[player];
    let mut affordable: Vec<u32> = denominations
        .iter()
        .copied()
        .filter(|&amount| i64::from(amount) <= balance)
        .collect();
    affordable.sort_unstable();
    affordable.dedup();
    affordable
}
