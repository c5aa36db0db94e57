//! Card primitives shared by the mini-games
//!
//! Two rank conventions coexist: the single-card draws (7-Up-Down,
//! Dragon Tiger) treat ace as 1 with value 1..=13, while Teen Patti
//! ranks 2..=14 with ace high (low only inside the A-2-3 run).

use crate::games::rng::OutcomeSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four suit symbols
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    #[serde(rename = "♠")]
    Spades,
    #[serde(rename = "♥")]
    Hearts,
    #[serde(rename = "♦")]
    Diamonds,
    #[serde(rename = "♣")]
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suit::Spades => write!(f, "♠"),
            Suit::Hearts => write!(f, "♥"),
            Suit::Diamonds => write!(f, "♦"),
            Suit::Clubs => write!(f, "♣"),
        }
    }
}

/// A Teen Patti card: rank 2..=14 (11=J, 12=Q, 13=K, 14=A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

/// Display label for an ace-high rank (2..=14)
pub fn rank_label(rank: u8) -> String {
    match rank {
        14 => "A".to_string(),
        13 => "K".to_string(),
        12 => "Q".to_string(),
        11 => "J".to_string(),
        r => r.to_string(),
    }
}

/// Display label for an ace-low card value (1..=13)
pub fn card_value_label(value: u8) -> String {
    match value {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        v => v.to_string(),
    }
}

/// Draw one ace-low card value uniformly from 1..=13
pub fn draw_card_value(source: &mut dyn OutcomeSource) -> u8 {
    source.draw(13) as u8 + 1
}

/// Standard 52-card deck, ranks 2..=14 across all four suits
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for &suit in &Suit::ALL {
        for rank in 2..=14 {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// A drawn card as serialized on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardView {
    pub rank: u8,
    pub label: String,
    pub suit: Suit,
}

impl From<Card> for CardView {
    fn from(card: Card) -> Self {
        Self {
            rank: card.rank,
            label: rank_label(card.rank),
            suit: card.suit,
        }
    }
}
