//! Dragon Tiger
//!
//! Two independent card values 1..=13 (ace low); the higher side wins,
//! equal values tie. Dragon and tiger calls pay even money, tie pays 8x.

use crate::errors::{BetError, BetResult};
use crate::games::cards::{card_value_label, draw_card_value};
use crate::games::rng::OutcomeSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DragonTigerSelection {
    Dragon,
    Tiger,
    Tie,
}

impl fmt::Display for DragonTigerSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragonTigerSelection::Dragon => write!(f, "dragon"),
            DragonTigerSelection::Tiger => write!(f, "tiger"),
            DragonTigerSelection::Tie => write!(f, "tie"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideCard {
    pub value: u8,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragonTigerResult {
    pub game: &'static str,
    pub selection: DragonTigerSelection,
    pub amount: f64,
    pub dragon: SideCard,
    pub tiger: SideCard,
    pub winner: DragonTigerSelection,
    pub payout_multiplier: f64,
    pub win_amount: f64,
    pub outcome: &'static str,
    pub timestamp: DateTime<Utc>,
}

fn multiplier(winner: DragonTigerSelection) -> f64 {
    match winner {
        DragonTigerSelection::Tie => 8.0,
        _ => 1.0,
    }
}

/// Deal one round against the given outcome source.
pub fn deal(
    selection: DragonTigerSelection,
    amount: f64,
    source: &mut dyn OutcomeSource,
) -> BetResult<DragonTigerResult> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BetError::validation("Invalid amount"));
    }

    let dragon = draw_card_value(source);
    let tiger = draw_card_value(source);

    let winner = if dragon > tiger {
        DragonTigerSelection::Dragon
    } else if tiger > dragon {
        DragonTigerSelection::Tiger
    } else {
        DragonTigerSelection::Tie
    };

    let payout_multiplier = multiplier(winner);
    let win = selection == winner;
    let win_amount = if win { amount * payout_multiplier } else { 0.0 };

    Ok(DragonTigerResult {
        game: "dragon-tiger",
        selection,
        amount,
        dragon: SideCard {
            value: dragon,
            label: card_value_label(dragon),
        },
        tiger: SideCard {
            value: tiger,
            label: card_value_label(tiger),
        },
        winner,
        payout_multiplier,
        win_amount,
        outcome: if win { "win" } else { "lose" },
        timestamp: Utc::now(),
    })
}
