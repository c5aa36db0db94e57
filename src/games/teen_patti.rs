//! Teen Patti
//!
//! Deck construction, unbiased shuffle and the 3-card hand comparator.
//! Category order, strongest first: Trail, Pure Sequence, Sequence,
//! Color, Pair, High Card. {A,2,3} counts as the lowest straight with 3
//! as its top card for tie-break purposes.

use crate::errors::{BetError, BetResult};
use crate::games::cards::{build_deck, Card, CardView};
use crate::games::rng::{shuffle, OutcomeSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Hand categories, numeric rank 1 (weakest) to 6 (strongest)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 1,
    Pair = 2,
    Color = 3,
    Sequence = 4,
    PureSequence = 5,
    Trail = 6,
}

impl HandCategory {
    pub fn label(&self) -> &'static str {
        match self {
            HandCategory::Trail => "Trail",
            HandCategory::PureSequence => "Pure Sequence",
            HandCategory::Sequence => "Sequence",
            HandCategory::Color => "Color",
            HandCategory::Pair => "Pair",
            HandCategory::HighCard => "High Card",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Evaluated hand strength: category plus an ordered tie-break key,
/// most significant element first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandValue {
    pub category: HandCategory,
    pub tie_key: Vec<u8>,
}

/// Sequence check over three ace-high ranks. Returns the top card of
/// the run; {A,2,3} is the lowest straight with top card 3.
fn sequence_top(ranks: [u8; 3]) -> Option<u8> {
    let mut sorted = ranks;
    sorted.sort_unstable();
    if sorted == [2, 3, 14] {
        return Some(3);
    }
    if sorted[0] + 1 == sorted[1] && sorted[1] + 1 == sorted[2] {
        return Some(sorted[2]);
    }
    None
}

/// Evaluate a 3-card hand into its category and tie-break key.
pub fn evaluate(hand: &[Card; 3]) -> HandValue {
    let mut ranks = [hand[0].rank, hand[1].rank, hand[2].rank];
    ranks.sort_unstable();
    let flush = hand.iter().all(|c| c.suit == hand[0].suit);
    let run_top = sequence_top(ranks);

    if ranks[0] == ranks[1] && ranks[1] == ranks[2] {
        return HandValue {
            category: HandCategory::Trail,
            tie_key: vec![ranks[2]],
        };
    }
    if let Some(top) = run_top {
        return HandValue {
            category: if flush {
                HandCategory::PureSequence
            } else {
                HandCategory::Sequence
            },
            tie_key: vec![top],
        };
    }
    if flush {
        return HandValue {
            category: HandCategory::Color,
            tie_key: vec![ranks[2], ranks[1], ranks[0]],
        };
    }
    if ranks[0] == ranks[1] || ranks[1] == ranks[2] {
        let (pair, kicker) = if ranks[0] == ranks[1] {
            (ranks[0], ranks[2])
        } else {
            (ranks[1], ranks[0])
        };
        return HandValue {
            category: HandCategory::Pair,
            tie_key: vec![pair, kicker],
        };
    }
    HandValue {
        category: HandCategory::HighCard,
        tie_key: vec![ranks[2], ranks[1], ranks[0]],
    }
}

/// Compare two evaluated hands: category first, then the tie-break key
/// element-wise with missing elements read as 0.
pub fn compare(a: &HandValue, b: &HandValue) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => {}
        other => return other,
    }
    let len = a.tie_key.len().max(b.tie_key.len());
    for i in 0..len {
        let av = a.tie_key.get(i).copied().unwrap_or(0);
        let bv = b.tie_key.get(i).copied().unwrap_or(0);
        match av.cmp(&bv) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

/// Who the player backs before the deal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TeenPattiSelection {
    PlayerA,
    PlayerB,
    Tie,
}

/// One revealed hand with its evaluated category
#[derive(Debug, Clone, Serialize)]
pub struct RevealedHand {
    pub hand: Vec<CardView>,
    pub info: HandInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct HandInfo {
    pub rank: u8,
    pub label: &'static str,
}

/// Full deal result with both hands revealed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeenPattiResult {
    pub game: &'static str,
    pub selection: TeenPattiSelection,
    pub amount: f64,
    pub player_a: RevealedHand,
    pub player_b: RevealedHand,
    pub winner: TeenPattiSelection,
    pub payout_multiplier: f64,
    pub win_amount: f64,
    pub timestamp: DateTime<Utc>,
}

fn multiplier(winner: TeenPattiSelection) -> f64 {
    match winner {
        TeenPattiSelection::Tie => 8.0,
        _ => 1.0,
    }
}

fn reveal(hand: &[Card; 3], value: &HandValue) -> RevealedHand {
    RevealedHand {
        hand: hand.iter().map(|&c| CardView::from(c)).collect(),
        info: HandInfo {
            rank: value.category as u8,
            label: value.category.label(),
        },
    }
}

/// Shuffle a fresh deck and deal 3 cards to each of two hands without
/// replacement, then settle the player's call.
pub fn deal(
    selection: TeenPattiSelection,
    amount: f64,
    source: &mut dyn OutcomeSource,
) -> BetResult<TeenPattiResult> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BetError::validation("Invalid amount"));
    }

    let mut deck = build_deck();
    shuffle(&mut deck, source);

    let mut draw = || deck.pop().expect("52-card deck cannot run dry on 6 draws");
    let hand_a = [draw(), draw(), draw()];
    let hand_b = [draw(), draw(), draw()];

    let eval_a = evaluate(&hand_a);
    let eval_b = evaluate(&hand_b);

    let winner = match compare(&eval_a, &eval_b) {
        Ordering::Greater => TeenPattiSelection::PlayerA,
        Ordering::Less => TeenPattiSelection::PlayerB,
        Ordering::Equal => TeenPattiSelection::Tie,
    };

    let payout_multiplier = multiplier(winner);
    let win = selection == winner;
    let win_amount = if win { amount * payout_multiplier } else { 0.0 };

    Ok(TeenPattiResult {
        game: "teenpatti",
        selection,
        amount,
        player_a: reveal(&hand_a, &eval_a),
        player_b: reveal(&hand_b, &eval_b),
        winner,
        payout_multiplier,
        win_amount,
        timestamp: Utc::now(),
    })
}
