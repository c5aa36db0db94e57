//! Roulette (straight bets only)
//!
//! Accepts a batch of straight-number bets, silently drops malformed
//! entries, spins one number 0..=36 and pays 35:1 on hits. Only an
//! empty valid set is an error.

use crate::errors::{BetError, BetResult};
use crate::games::rng::OutcomeSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Straight-bet payout, 35:1
const STRAIGHT_MULTIPLIER: f64 = 35.0;

/// The 18 red numbers on a standard wheel
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Raw bet entry from the request; every field optional so malformed
/// entries deserialize and can be filtered instead of failing the batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouletteBetEntry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// A bet that survived sanitization
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StraightBet {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub number: u8,
    pub amount: f64,
}

/// Per-bet outcome in the response
#[derive(Debug, Clone, Serialize)]
pub struct BetOutcomeEntry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub number: u8,
    pub amount: f64,
    pub win: bool,
    pub payout: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WheelColor {
    Green,
    Red,
    Black,
}

/// Full spin result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouletteResult {
    pub game: &'static str,
    pub number: u8,
    pub color: WheelColor,
    pub outcomes: Vec<BetOutcomeEntry>,
    pub total_bet: f64,
    pub win_amount: f64,
    pub balance_change: f64,
    pub timestamp: DateTime<Utc>,
}

/// Color of a pocket: 0 is green, the standard 18 are red, the rest black
pub fn wheel_color(number: u8) -> WheelColor {
    if number == 0 {
        WheelColor::Green
    } else if RED_NUMBERS.contains(&number) {
        WheelColor::Red
    } else {
        WheelColor::Black
    }
}

/// Drop entries that are not straight bets on 0..=36 with a positive
/// finite amount.
fn sanitize(entries: &[RouletteBetEntry]) -> Vec<StraightBet> {
    entries
        .iter()
        .filter_map(|entry| {
            if entry.kind.as_deref().unwrap_or("straight") != "straight" {
                return None;
            }
            let amount = entry.amount?;
            if !amount.is_finite() || amount <= 0.0 {
                return None;
            }
            let number = entry.number?;
            if !(0..=36).contains(&number) {
                return None;
            }
            Some(StraightBet {
                kind: "straight",
                number: number as u8,
                amount,
            })
        })
        .collect()
}

/// Spin the wheel against a batch of bet entries.
pub fn spin(
    entries: &[RouletteBetEntry],
    source: &mut dyn OutcomeSource,
) -> BetResult<RouletteResult> {
    let bets = sanitize(entries);
    let total_bet: f64 = bets.iter().map(|b| b.amount).sum();
    if total_bet <= 0.0 {
        return Err(BetError::validation("No valid bets placed"));
    }

    let number = source.draw(37) as u8;
    let color = wheel_color(number);

    let outcomes: Vec<BetOutcomeEntry> = bets
        .into_iter()
        .map(|bet| {
            let win = bet.number == number;
            BetOutcomeEntry {
                kind: bet.kind,
                number: bet.number,
                amount: bet.amount,
                win,
                payout: if win { bet.amount * STRAIGHT_MULTIPLIER } else { 0.0 },
            }
        })
        .collect();

    let win_amount: f64 = outcomes.iter().map(|o| o.payout).sum();

    Ok(RouletteResult {
        game: "roulette",
        number,
        color,
        outcomes,
        total_bet,
        win_amount,
        balance_change: win_amount - total_bet,
        timestamp: Utc::now(),
    })
}
