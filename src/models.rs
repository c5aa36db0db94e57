//! Domain Models
//!
//! Bets, user accounts and the enums describing their lifecycle. Wire
//! serialization is camelCase to match the public HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minimum stake accepted for a single bet
pub const MIN_STAKE: f64 = 1.0;
/// Maximum stake accepted for a single bet
pub const MAX_STAKE: f64 = 250_000.0;

/// Back (outcome happens) or lay (outcome does not happen)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Back,
    Lay,
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetType::Back => write!(f, "back"),
            BetType::Lay => write!(f, "lay"),
        }
    }
}

/// Bet lifecycle states. Only `pending -> cancelled` is driven by this
/// crate; the remaining transitions belong to an external settlement
/// engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Pending,
    Matched,
    Cancelled,
    Settled,
    Void,
}

impl BetStatus {
    /// Fixed order used for deterministic summary output
    pub const ALL: [BetStatus; 5] = [
        BetStatus::Pending,
        BetStatus::Matched,
        BetStatus::Cancelled,
        BetStatus::Settled,
        BetStatus::Void,
    ];
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetStatus::Pending => write!(f, "pending"),
            BetStatus::Matched => write!(f, "matched"),
            BetStatus::Cancelled => write!(f, "cancelled"),
            BetStatus::Settled => write!(f, "settled"),
            BetStatus::Void => write!(f, "void"),
        }
    }
}

/// Settlement outcome, absent until the bet is settled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BetOutcome {
    Won,
    Lost,
    Void,
}

/// Match-context snapshot embedded in a bet for display purposes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_date: Option<DateTime<Utc>>,
}

/// A wager on a match runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: String,
    pub user_id: String,
    pub match_id: String,
    pub runner: String,
    pub bet_type: BetType,
    pub odds: f64,
    pub stake: f64,
    pub potential_win: f64,
    pub liability: f64,
    pub status: BetStatus,
    pub matched_amount: f64,
    pub unmatched_amount: f64,
    pub placed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<DateTime<Utc>>,
    pub result: Option<BetOutcome>,
    pub payout: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_details: Option<MatchDetails>,
}

impl Bet {
    /// Build a pending bet with derived risk fields.
    ///
    /// Back: liability 0, potential win = stake * (odds - 1).
    /// Lay: potential win = stake, liability = stake * (odds - 1).
    pub fn new(
        user_id: String,
        match_id: String,
        runner: String,
        bet_type: BetType,
        odds: f64,
        stake: f64,
        match_details: Option<MatchDetails>,
    ) -> Self {
        let (potential_win, liability) = match bet_type {
            BetType::Back => (stake * (odds - 1.0), 0.0),
            BetType::Lay => (stake, stake * (odds - 1.0)),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            match_id,
            runner,
            bet_type,
            odds,
            stake,
            potential_win,
            liability,
            status: BetStatus::Pending,
            matched_amount: 0.0,
            unmatched_amount: stake,
            placed_at: Utc::now(),
            settled_at: None,
            result: None,
            payout: 0.0,
            match_details,
        }
    }

    /// Amount reserved from the balance when the bet is placed: the
    /// stake for back bets, the liability for lay bets.
    pub fn amount_at_risk(&self) -> f64 {
        match self.bet_type {
            BetType::Back => self.stake,
            BetType::Lay => self.liability,
        }
    }

    /// Amount credited back on cancellation; same figure as the reserve.
    pub fn refund_amount(&self) -> f64 {
        self.amount_at_risk()
    }
}

/// A user account as the ledger sees it. `balance` may be untracked, in
/// which case all balance checks and adjustments are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub full_name: String,
    pub email: String,
    /// Opaque credential digest; never serialized to clients
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserAccount {
    pub fn new(full_name: String, email: String, password_digest: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            full_name,
            email,
            password_digest,
            role: UserRole::User,
            is_active: true,
            balance: None,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    /// Same account with an explicit starting balance
    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = Some(balance);
        self
    }
}
