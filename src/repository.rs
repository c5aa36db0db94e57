//! Repository interfaces and in-memory implementations
//!
//! The ledger and market aggregator only ever see these traits; the
//! document store behind them is a collaborator. The in-memory variants
//! back the demo deployment and the tests.

use crate::errors::{BetError, BetResult};
use crate::models::{Bet, BetStatus, UserAccount};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Filter for user bet queries; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct BetFilter {
    pub status: Option<BetStatus>,
    pub match_id: Option<String>,
}

/// Accounts store used by the ledger and the auth layer
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> BetResult<Option<UserAccount>>;
    async fn find_by_email(&self, email: &str) -> BetResult<Option<UserAccount>>;
    /// Insert a new account; `Conflict` if the email is already taken
    async fn insert(&self, user: &UserAccount) -> BetResult<()>;
    async fn update(&self, user: &UserAccount) -> BetResult<()>;
}

/// Bets store used by the ledger and the market aggregator
#[async_trait]
pub trait BetRepository: Send + Sync {
    async fn insert(&self, bet: &Bet) -> BetResult<()>;
    async fn update(&self, bet: &Bet) -> BetResult<()>;
    async fn find_by_id(&self, id: &str) -> BetResult<Option<Bet>>;
    /// All bets owned by `user_id` matching the filter, unordered
    async fn find_for_user(&self, user_id: &str, filter: &BetFilter) -> BetResult<Vec<Bet>>;
    /// Open bets (pending or matched) for a match, in insertion order
    async fn find_open_for_match(&self, match_id: &str) -> BetResult<Vec<Bet>>;
}

/// DashMap-backed account repository
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, UserAccount>,
}

impl InMemoryUserRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl UserAccountRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> BetResult<Option<UserAccount>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> BetResult<Option<UserAccount>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| u.value().clone()))
    }

    async fn insert(&self, user: &UserAccount) -> BetResult<()> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(BetError::conflict("User with this email already exists"));
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &UserAccount) -> BetResult<()> {
        if !self.users.contains_key(&user.id) {
            return Err(BetError::not_found("User not found"));
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}

/// DashMap-backed bet repository. An insertion counter preserves the
/// order `find_open_for_match` must report.
#[derive(Default)]
pub struct InMemoryBetRepository {
    bets: DashMap<String, (u64, Bet)>,
    seq: std::sync::atomic::AtomicU64,
}

impl InMemoryBetRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl BetRepository for InMemoryBetRepository {
    async fn insert(&self, bet: &Bet) -> BetResult<()> {
        let seq = self
            .seq
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.bets.insert(bet.id.clone(), (seq, bet.clone()));
        Ok(())
    }

    async fn update(&self, bet: &Bet) -> BetResult<()> {
        match self.bets.get_mut(&bet.id) {
            Some(mut entry) => {
                entry.1 = bet.clone();
                Ok(())
            }
            None => Err(BetError::not_found("Bet not found")),
        }
    }

    async fn find_by_id(&self, id: &str) -> BetResult<Option<Bet>> {
        Ok(self.bets.get(id).map(|entry| entry.1.clone()))
    }

    async fn find_for_user(&self, user_id: &str, filter: &BetFilter) -> BetResult<Vec<Bet>> {
        Ok(self
            .bets
            .iter()
            .map(|entry| entry.value().1.clone())
            .filter(|bet| bet.user_id == user_id)
            .filter(|bet| filter.status.map_or(true, |s| bet.status == s))
            .filter(|bet| {
                filter
                    .match_id
                    .as_deref()
                    .map_or(true, |m| bet.match_id == m)
            })
            .collect())
    }

    async fn find_open_for_match(&self, match_id: &str) -> BetResult<Vec<Bet>> {
        let mut open: Vec<(u64, Bet)> = self
            .bets
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|(_, bet)| bet.match_id == match_id)
            .filter(|(_, bet)| {
                matches!(bet.status, BetStatus::Pending | BetStatus::Matched)
            })
            .collect();
        open.sort_by_key(|(seq, _)| *seq);
        Ok(open.into_iter().map(|(_, bet)| bet).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BetType;

    fn bet_for(user: &str, match_id: &str, status: BetStatus) -> Bet {
        let mut bet = Bet::new(
            user.into(),
            match_id.into(),
            "Arsenal".into(),
            BetType::Back,
            2.0,
            10.0,
            None,
        );
        bet.status = status;
        bet
    }

    #[tokio::test]
    async fn test_user_insert_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        let a = UserAccount::new("A".into(), "a@example.com".into(), "d".into());
        let b = UserAccount::new("B".into(), "A@Example.com".into(), "d".into());
        repo.insert(&a).await.unwrap();
        assert!(matches!(
            repo.insert(&b).await,
            Err(BetError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_bet_filter_matches_status_and_match() {
        let repo = InMemoryBetRepository::new();
        repo.insert(&bet_for("u1", "m1", BetStatus::Pending))
            .await
            .unwrap();
        repo.insert(&bet_for("u1", "m1", BetStatus::Cancelled))
            .await
            .unwrap();
        repo.insert(&bet_for("u1", "m2", BetStatus::Pending))
            .await
            .unwrap();
        repo.insert(&bet_for("u2", "m1", BetStatus::Pending))
            .await
            .unwrap();

        let filter = BetFilter {
            status: Some(BetStatus::Pending),
            match_id: Some("m1".into()),
        };
        let bets = repo.find_for_user("u1", &filter).await.unwrap();
        assert_eq!(bets.len(), 1);
        assert_eq!(bets[0].match_id, "m1");
    }

    #[tokio::test]
    async fn test_open_for_match_excludes_closed_states() {
        let repo = InMemoryBetRepository::new();
        repo.insert(&bet_for("u1", "m1", BetStatus::Pending))
            .await
            .unwrap();
        repo.insert(&bet_for("u2", "m1", BetStatus::Matched))
            .await
            .unwrap();
        repo.insert(&bet_for("u3", "m1", BetStatus::Settled))
            .await
            .unwrap();
        repo.insert(&bet_for("u4", "m1", BetStatus::Void))
            .await
            .unwrap();

        let open = repo.find_open_for_match("m1").await.unwrap();
        assert_eq!(open.len(), 2);
        // Insertion order preserved
        assert_eq!(open[0].user_id, "u1");
        assert_eq!(open[1].user_id, "u2");
    }

    #[tokio::test]
    async fn test_update_missing_bet_is_not_found() {
        let repo = InMemoryBetRepository::new();
        let bet = bet_for("u1", "m1", BetStatus::Pending);
        assert!(matches!(
            repo.update(&bet).await,
            Err(BetError::NotFound(_))
        ));
    }
}
