//! Chance-based mini-games
//!
//! Pure evaluators over an injected random outcome source. Nothing in
//! here carries state across calls.

pub mod cards;
pub mod dragon_tiger;
pub mod rng;
pub mod roulette;
pub mod seven_up_down;
pub mod teen_patti;
