//! 7-Up-Down
//!
//! One card value 1..=13 decides the round: below 7 is "down", exactly
//! 7 is "seven", above 7 is "up". A correct "seven" call pays 11x, the
//! other two pay even money.

use crate::errors::{BetError, BetResult};
use crate::games::cards::{card_value_label, draw_card_value};
use crate::games::rng::OutcomeSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the player calls before the draw
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SevenSelection {
    Up,
    Down,
    Seven,
}

impl fmt::Display for SevenSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SevenSelection::Up => write!(f, "up"),
            SevenSelection::Down => write!(f, "down"),
            SevenSelection::Seven => write!(f, "seven"),
        }
    }
}

/// The drawn card as serialized on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawnCard {
    pub value: u8,
    pub label: String,
}

/// Full round result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SevenUpDownResult {
    pub game: &'static str,
    pub selection: SevenSelection,
    pub amount: f64,
    pub card: DrawnCard,
    pub category: SevenSelection,
    pub outcome: &'static str,
    pub payout_multiplier: f64,
    pub win_amount: f64,
    pub timestamp: DateTime<Utc>,
}

fn classify(value: u8) -> SevenSelection {
    match value {
        v if v < 7 => SevenSelection::Down,
        7 => SevenSelection::Seven,
        _ => SevenSelection::Up,
    }
}

/// Play one round against the given outcome source.
pub fn play(
    selection: SevenSelection,
    amount: f64,
    source: &mut dyn OutcomeSource,
) -> BetResult<SevenUpDownResult> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BetError::validation("Invalid amount"));
    }

    let value = draw_card_value(source);
    let category = classify(value);
    let payout_multiplier = if category == SevenSelection::Seven {
        11.0
    } else {
        1.0
    };
    let win = selection == category;
    let win_amount = if win { amount * payout_multiplier } else { 0.0 };

    Ok(SevenUpDownResult {
        game: "7updown",
        selection,
        amount,
        card: DrawnCard {
            value,
            label: card_value_label(value),
        },
        category,
        outcome: if win { "win" } else { "lose" },
        payout_multiplier,
        win_amount,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::rng::testing::ScriptedSource;

    #[test]
    fn test_seven_call_pays_eleven_times() {
        let mut source = ScriptedSource::new(vec![6]); // draw value 7
        let result = play(SevenSelection::Seven, 10.0, &mut source).unwrap();
        assert_eq!(result.card.value, 7);
        assert_eq!(result.category, SevenSelection::Seven);
        assert_eq!(result.outcome, "win");
        assert_eq!(result.payout_multiplier, 11.0);
        assert_eq!(result.win_amount, 110.0);
    }

    #[test]
    fn test_up_call_pays_even_money() {
        let mut source = ScriptedSource::new(vec![12]); // draw value 13
        let result = play(SevenSelection::Up, 10.0, &mut source).unwrap();
        assert_eq!(result.category, SevenSelection::Up);
        assert_eq!(result.payout_multiplier, 1.0);
        assert_eq!(result.win_amount, 10.0);
    }

    #[test]
    fn test_wrong_call_wins_nothing() {
        let mut source = ScriptedSource::new(vec![2]); // draw value 3 -> down
        let result = play(SevenSelection::Up, 10.0, &mut source).unwrap();
        assert_eq!(result.category, SevenSelection::Down);
        assert_eq!(result.outcome, "lose");
        assert_eq!(result.win_amount, 0.0);
    }

    #[test]
    fn test_invalid_amount_rejected() {
        let mut source = ScriptedSource::new(vec![0]);
        assert!(matches!(
            play(SevenSelection::Up, 0.0, &mut source),
            Err(BetError::Validation(_))
        ));
        assert!(matches!(
            play(SevenSelection::Up, f64::NAN, &mut source),
            Err(BetError::Validation(_))
        ));
    }

    #[test]
    fn test_seven_without_call_still_even_money_for_others() {
        // Drawn value 7 but player called "up": 11x applies only to a
        // correct "seven" call
        let mut source = ScriptedSource::new(vec![6]);
        let result = play(SevenSelection::Up, 10.0, &mut source).unwrap();
        assert_eq!(result.payout_multiplier, 11.0);
        assert_eq!(result.win_amount, 0.0);
    }
}
