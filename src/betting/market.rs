//! Market Aggregator
//!
//! Groups the open bets on a match into a per-runner back/lay depth
//! view. This is a display aggregation, not an order book: entries keep
//! repository insertion order and no price-time priority is applied.

use crate::errors::BetResult;
use crate::models::BetType;
use crate::repository::{BetRepository, UserAccountRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One open bet as shown in the market depth view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketEntry {
    pub odds: f64,
    /// Unmatched portion of the stake
    pub amount: f64,
    pub user_id: String,
    /// Bettor's display name; empty if the account is gone
    pub username: String,
}

/// Back and lay sides for one runner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerMarket {
    pub back: Vec<MarketEntry>,
    pub lay: Vec<MarketEntry>,
}

/// Full market view for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMarket {
    pub market_data: HashMap<String, RunnerMarket>,
    pub total_bets: usize,
}

/// Read-side aggregator over the bet and account repositories
pub struct MarketAggregator {
    bets: Arc<dyn BetRepository>,
    users: Arc<dyn UserAccountRepository>,
}

impl MarketAggregator {
    pub fn new(bets: Arc<dyn BetRepository>, users: Arc<dyn UserAccountRepository>) -> Self {
        Self { bets, users }
    }

    /// Open (pending or matched) bets for `match_id`, grouped by runner
    /// and side.
    pub async fn get_match_market(&self, match_id: &str) -> BetResult<MatchMarket> {
        let open = self.bets.find_open_for_match(match_id).await?;
        let total_bets = open.len();

        // One account lookup per distinct bettor
        let mut names: HashMap<String, String> = HashMap::new();
        let mut market_data: HashMap<String, RunnerMarket> = HashMap::new();
        for bet in open {
            let username = match names.get(&bet.user_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self
                        .users
                        .find_by_id(&bet.user_id)
                        .await?
                        .map(|u| u.full_name)
                        .unwrap_or_default();
                    names.insert(bet.user_id.clone(), name.clone());
                    name
                }
            };

            let runner = market_data.entry(bet.runner.clone()).or_default();
            let entry = MarketEntry {
                odds: bet.odds,
                amount: bet.unmatched_amount,
                user_id: bet.user_id.clone(),
                username,
            };
            match bet.bet_type {
                BetType::Back => runner.back.push(entry),
                BetType::Lay => runner.lay.push(entry),
            }
        }

        Ok(MatchMarket {
            market_data,
            total_bets,
        })
    }
}
