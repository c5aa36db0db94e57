//! Betting core: wager ledger and market aggregation

pub mod ledger;
pub mod market;

pub use ledger::{PlaceBetInput, StatusTotals, UserSummary, WagerLedger};
pub use market::{MarketAggregator, MarketEntry, MatchMarket, RunnerMarket};
