//! Wager Ledger
//!
//! Validates stakes, computes liability and potential win, reserves
//! balances and drives the pending -> cancelled transition. Balance
//! reads and writes for one user are serialized behind a per-user lock,
//! so two concurrent placements cannot both pass the balance check.

use crate::errors::{BetError, BetResult};
use crate::models::{Bet, BetStatus, BetType, MatchDetails, MAX_STAKE, MIN_STAKE};
use crate::repository::{BetFilter, BetRepository, UserAccountRepository};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Maximum number of bets returned by a single listing query
const USER_BETS_LIMIT: usize = 50;

/// Validated input for placing a bet
#[derive(Debug, Clone)]
pub struct PlaceBetInput {
    pub match_id: String,
    pub runner: String,
    pub bet_type: BetType,
    pub odds: f64,
    pub stake: f64,
    pub match_details: Option<MatchDetails>,
}

/// Per-status aggregate for the betting summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotals {
    pub status: BetStatus,
    pub count: usize,
    pub total_stake: f64,
    pub total_payout: f64,
}

/// Betting summary for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub summary: Vec<StatusTotals>,
    pub balance: f64,
}

/// The ledger coordinating bets and user balances
pub struct WagerLedger {
    users: Arc<dyn UserAccountRepository>,
    bets: Arc<dyn BetRepository>,
    /// One lock per user id, held across the read-check-write sequence
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl WagerLedger {
    pub fn new(users: Arc<dyn UserAccountRepository>, bets: Arc<dyn BetRepository>) -> Self {
        Self {
            users,
            bets,
            user_locks: DashMap::new(),
        }
    }

    fn lock_for(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Place a bet for `user_id`, reserving the amount at risk from the
    /// balance when one is tracked.
    pub async fn place_bet(&self, user_id: &str, input: PlaceBetInput) -> BetResult<Bet> {
        if input.match_id.trim().is_empty() || input.runner.trim().is_empty() {
            return Err(BetError::validation("All fields are required"));
        }
        if !input.odds.is_finite() || input.odds < 1.0 {
            return Err(BetError::validation("Odds must be at least 1"));
        }
        if !input.stake.is_finite() || input.stake < MIN_STAKE {
            return Err(BetError::validation("Minimum stake is 1"));
        }
        if input.stake > MAX_STAKE {
            return Err(BetError::validation("Maximum stake is 250,000"));
        }

        let lock = self.lock_for(user_id);
        let _guard = lock.lock().await;

        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| BetError::not_found("User not found"))?;

        let bet = Bet::new(
            user_id.to_string(),
            input.match_id,
            input.runner,
            input.bet_type,
            input.odds,
            input.stake,
            input.match_details,
        );
        let required = bet.amount_at_risk();

        if let Some(balance) = user.balance {
            if balance < required {
                return Err(BetError::InsufficientFunds {
                    required,
                    available: balance,
                });
            }
        }

        // Bet first, then the debit. The user lock keeps the pair from
        // interleaving with another placement for the same user.
        self.bets.insert(&bet).await?;

        if let Some(balance) = user.balance {
            user.balance = Some(balance - required);
            self.users.update(&user).await?;
        }

        info!(
            bet_id = %bet.id,
            user_id,
            match_id = %bet.match_id,
            bet_type = %bet.bet_type,
            stake = bet.stake,
            "Bet placed"
        );
        Ok(bet)
    }

    /// Cancel a pending bet owned by `user_id` and refund the reserve.
    ///
    /// One NotFound covers "no such bet", "not yours" and "wrong
    /// status"; callers learn nothing about bets they do not own.
    pub async fn cancel_bet(&self, user_id: &str, bet_id: &str) -> BetResult<()> {
        let lock = self.lock_for(user_id);
        let _guard = lock.lock().await;

        let mut bet = match self.bets.find_by_id(bet_id).await? {
            Some(bet) if bet.user_id == user_id && bet.status == BetStatus::Pending => bet,
            _ => {
                return Err(BetError::not_found("Bet not found or cannot be cancelled"));
            }
        };

        bet.status = BetStatus::Cancelled;
        self.bets.update(&bet).await?;

        // Refund is best-effort: a missing user record is logged, not
        // surfaced.
        match self.users.find_by_id(user_id).await? {
            Some(mut user) => {
                if let Some(balance) = user.balance {
                    user.balance = Some(balance + bet.refund_amount());
                    self.users.update(&user).await?;
                }
            }
            None => {
                warn!(bet_id, user_id, "Cancelled bet has no user record; refund skipped");
            }
        }

        info!(bet_id, user_id, "Bet cancelled");
        Ok(())
    }

    /// List a user's bets, newest first, capped at 50.
    pub async fn get_user_bets(&self, user_id: &str, filter: &BetFilter) -> BetResult<Vec<Bet>> {
        let mut bets = self.bets.find_for_user(user_id, filter).await?;
        bets.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        bets.truncate(USER_BETS_LIMIT);
        Ok(bets)
    }

    /// Per-status totals plus the current balance (0 when untracked).
    pub async fn get_betting_summary(&self, user_id: &str) -> BetResult<UserSummary> {
        let bets = self
            .bets
            .find_for_user(user_id, &BetFilter::default())
            .await?;

        let summary = BetStatus::ALL
            .iter()
            .filter_map(|&status| {
                let group: Vec<&Bet> = bets.iter().filter(|b| b.status == status).collect();
                if group.is_empty() {
                    return None;
                }
                Some(StatusTotals {
                    status,
                    count: group.len(),
                    total_stake: group.iter().map(|b| b.stake).sum(),
                    total_payout: group.iter().map(|b| b.payout).sum(),
                })
            })
            .collect();

        let balance = self
            .users
            .find_by_id(user_id)
            .await?
            .and_then(|u| u.balance)
            .unwrap_or(0.0);

        Ok(UserSummary { summary, balance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserAccount;
    use crate::repository::{InMemoryBetRepository, InMemoryUserRepository};

    fn input(bet_type: BetType, odds: f64, stake: f64) -> PlaceBetInput {
        PlaceBetInput {
            match_id: "m1".into(),
            runner: "Arsenal".into(),
            bet_type,
            odds,
            stake,
            match_details: None,
        }
    }

    async fn ledger_with_user(balance: Option<f64>) -> (WagerLedger, String) {
        let users = InMemoryUserRepository::new();
        let bets = InMemoryBetRepository::new();
        let mut user = UserAccount::new("Test".into(), "t@example.com".into(), "d".into());
        user.balance = balance;
        let id = user.id.clone();
        users.insert(&user).await.unwrap();
        (WagerLedger::new(users, bets), id)
    }

    #[tokio::test]
    async fn test_stake_bounds() {
        let (ledger, uid) = ledger_with_user(None).await;

        let err = ledger
            .place_bet(&uid, input(BetType::Back, 2.0, 0.5))
            .await
            .unwrap_err();
        assert!(matches!(err, BetError::Validation(_)));

        let err = ledger
            .place_bet(&uid, input(BetType::Back, 2.0, 250_001.0))
            .await
            .unwrap_err();
        assert!(matches!(err, BetError::Validation(_)));

        // Exactly at the cap is accepted
        let bet = ledger
            .place_bet(&uid, input(BetType::Back, 2.0, 250_000.0))
            .await
            .unwrap();
        assert_eq!(bet.stake, 250_000.0);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let (ledger, uid) = ledger_with_user(None).await;
        let mut bad = input(BetType::Back, 2.0, 10.0);
        bad.runner = "  ".into();
        assert!(matches!(
            ledger.place_bet(&uid, bad).await,
            Err(BetError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (ledger, _) = ledger_with_user(None).await;
        assert!(matches!(
            ledger
                .place_bet("nobody", input(BetType::Back, 2.0, 10.0))
                .await,
            Err(BetError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_insufficient_balance_leaves_no_bet() {
        let (ledger, uid) = ledger_with_user(Some(100.0)).await;

        // Lay at odds 4 with stake 50 risks 150
        let err = ledger
            .place_bet(&uid, input(BetType::Lay, 4.0, 50.0))
            .await
            .unwrap_err();
        assert!(matches!(err, BetError::InsufficientFunds { .. }));

        let bets = ledger
            .get_user_bets(&uid, &BetFilter::default())
            .await
            .unwrap();
        assert!(bets.is_empty());

        let summary = ledger.get_betting_summary(&uid).await.unwrap();
        assert_eq!(summary.balance, 100.0);
    }

    #[tokio::test]
    async fn test_back_bet_debits_stake() {
        let (ledger, uid) = ledger_with_user(Some(100.0)).await;
        ledger
            .place_bet(&uid, input(BetType::Back, 3.0, 30.0))
            .await
            .unwrap();
        let summary = ledger.get_betting_summary(&uid).await.unwrap();
        assert_eq!(summary.balance, 70.0);
    }

    #[tokio::test]
    async fn test_lay_bet_debits_liability() {
        let (ledger, uid) = ledger_with_user(Some(100.0)).await;
        let bet = ledger
            .place_bet(&uid, input(BetType::Lay, 3.0, 10.0))
            .await
            .unwrap();
        assert_eq!(bet.liability, 20.0);
        let summary = ledger.get_betting_summary(&uid).await.unwrap();
        assert_eq!(summary.balance, 80.0);
    }

    #[tokio::test]
    async fn test_untracked_balance_skips_checks() {
        let (ledger, uid) = ledger_with_user(None).await;
        // A huge liability goes through when no balance is tracked
        let bet = ledger
            .place_bet(&uid, input(BetType::Lay, 10.0, 100_000.0))
            .await
            .unwrap();
        assert_eq!(bet.liability, 900_000.0);
        let summary = ledger.get_betting_summary(&uid).await.unwrap();
        assert_eq!(summary.balance, 0.0);
    }

    #[tokio::test]
    async fn test_cancel_refunds_lay_liability() {
        let (ledger, uid) = ledger_with_user(Some(100.0)).await;
        let bet = ledger
            .place_bet(&uid, input(BetType::Lay, 3.0, 10.0))
            .await
            .unwrap();

        ledger.cancel_bet(&uid, &bet.id).await.unwrap();

        let summary = ledger.get_betting_summary(&uid).await.unwrap();
        assert_eq!(summary.balance, 100.0);

        let cancelled = ledger
            .get_user_bets(
                &uid,
                &BetFilter {
                    status: Some(BetStatus::Cancelled),
                    match_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_foreign_or_closed_bet_is_not_found() {
        let (ledger, uid) = ledger_with_user(Some(100.0)).await;
        let bet = ledger
            .place_bet(&uid, input(BetType::Back, 2.0, 10.0))
            .await
            .unwrap();

        // Not the owner
        assert!(matches!(
            ledger.cancel_bet("someone-else", &bet.id).await,
            Err(BetError::NotFound(_))
        ));

        // Already cancelled
        ledger.cancel_bet(&uid, &bet.id).await.unwrap();
        assert!(matches!(
            ledger.cancel_bet(&uid, &bet.id).await,
            Err(BetError::NotFound(_))
        ));

        // Balance refunded exactly once
        let summary = ledger.get_betting_summary(&uid).await.unwrap();
        assert_eq!(summary.balance, 100.0);
    }

    #[tokio::test]
    async fn test_user_bets_sorted_and_capped() {
        let (ledger, uid) = ledger_with_user(None).await;
        for _ in 0..60 {
            ledger
                .place_bet(&uid, input(BetType::Back, 2.0, 5.0))
                .await
                .unwrap();
        }
        let bets = ledger
            .get_user_bets(&uid, &BetFilter::default())
            .await
            .unwrap();
        assert_eq!(bets.len(), 50);
        for pair in bets.windows(2) {
            assert!(pair[0].placed_at >= pair[1].placed_at);
        }
    }

    #[tokio::test]
    async fn test_summary_is_idempotent() {
        let (ledger, uid) = ledger_with_user(Some(500.0)).await;
        ledger
            .place_bet(&uid, input(BetType::Back, 2.0, 10.0))
            .await
            .unwrap();
        let bet = ledger
            .place_bet(&uid, input(BetType::Back, 2.0, 20.0))
            .await
            .unwrap();
        ledger.cancel_bet(&uid, &bet.id).await.unwrap();

        let first = ledger.get_betting_summary(&uid).await.unwrap();
        let second = ledger.get_betting_summary(&uid).await.unwrap();
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.balance, second.balance);

        let pending = first
            .summary
            .iter()
            .find(|t| t.status == BetStatus::Pending)
            .unwrap();
        assert_eq!(pending.count, 1);
        assert_eq!(pending.total_stake, 10.0);
    }

    #[tokio::test]
    async fn test_concurrent_placements_cannot_overdraw() {
        let users = InMemoryUserRepository::new();
        let bets = InMemoryBetRepository::new();
        let user = UserAccount::new("Race".into(), "r@example.com".into(), "d".into())
            .with_balance(100.0);
        let uid = user.id.clone();
        users.insert(&user).await.unwrap();
        let ledger = Arc::new(WagerLedger::new(users.clone(), bets));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let ledger = ledger.clone();
            let uid = uid.clone();
            handles.push(tokio::spawn(async move {
                ledger
                    .place_bet(
                        &uid,
                        PlaceBetInput {
                            match_id: "m1".into(),
                            runner: "Arsenal".into(),
                            bet_type: BetType::Back,
                            odds: 2.0,
                            stake: 60.0,
                            match_details: None,
                        },
                    )
                    .await
            }));
        }

        let mut placed = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                placed += 1;
            }
        }
        assert_eq!(placed, 1);

        let balance = users.find_by_id(&uid).await.unwrap().unwrap().balance;
        assert_eq!(balance, Some(40.0));
    }
}
