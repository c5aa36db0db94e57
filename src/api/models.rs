//! API request and response bodies
//!
//! The wire format is camelCase. Betting requests keep every field
//! optional so missing input surfaces as a 400 envelope instead of a
//! framework rejection.

use crate::betting::StatusTotals;
use crate::models::{Bet, MatchDetails, UserAccount, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

/// Root welcome payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub success: bool,
    pub message: String,
    pub version: String,
}

// ---- auth ----

/// Auth request bodies keep every field optional for the same reason
/// as the betting requests: a missing field gets the validation
/// envelope, not a framework rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public view of an account, token issue omits the credential digest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&UserAccount> for UserView {
    fn from(user: &UserAccount) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthData {
    pub user: UserView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub data: AuthData,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

// ---- betting ----

/// Body for POST /api/betting/place. Everything optional: missing
/// fields are answered with the validation envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBetRequest {
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub runner: Option<String>,
    #[serde(default)]
    pub bet_type: Option<String>,
    #[serde(default)]
    pub odds: Option<f64>,
    #[serde(default)]
    pub stake: Option<f64>,
    #[serde(default)]
    pub match_details: Option<MatchDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceBetResponse {
    pub success: bool,
    pub message: String,
    pub bet: Bet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBetsQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub match_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserBetsResponse {
    pub success: bool,
    pub bets: Vec<Bet>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: Vec<StatusTotals>,
    pub balance: f64,
}

// ---- games ----

/// Lobby entry for GET /api/games
#[derive(Debug, Clone, Serialize)]
pub struct GameInfo {
    pub id: u32,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GamesLobbyResponse {
    pub success: bool,
    pub games: Vec<GameInfo>,
}

/// Shared body for the single-selection games. Selection stays a string
/// so an unknown value gets the game's own 400 message.
#[derive(Debug, Clone, Deserialize)]
pub struct GamePlayRequest {
    #[serde(default)]
    pub selection: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Body for POST /api/games/roulette/spin
#[derive(Debug, Clone, Deserialize)]
pub struct RouletteSpinRequest {
    #[serde(default)]
    pub bets: Vec<crate::games::roulette::RouletteBetEntry>,
}

/// Envelope wrapper for game results
#[derive(Debug, Clone, Serialize)]
pub struct GameResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub result: T,
}

impl<T: Serialize> GameResponse<T> {
    pub fn new(result: T) -> Self {
        Self {
            success: true,
            result,
        }
    }
}
