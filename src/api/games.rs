//! Mini-game handlers
//!
//! Each handler validates selection and amount, plays the round against
//! a fresh thread-local outcome source and returns the evaluator's
//! result record wrapped in the success envelope.

use crate::api::errors::ApiError;
use crate::api::models::{GameInfo, GamePlayRequest, GameResponse, GamesLobbyResponse, RouletteSpinRequest};
use crate::games::{
    dragon_tiger::{self, DragonTigerResult, DragonTigerSelection},
    rng::ThreadRngSource,
    roulette::{self, RouletteResult},
    seven_up_down::{self, SevenSelection, SevenUpDownResult},
    teen_patti::{self, TeenPattiResult, TeenPattiSelection},
};
use axum::Json;

/// GET /api/games
pub async fn games_lobby_handler() -> Json<GamesLobbyResponse> {
    Json(GamesLobbyResponse {
        success: true,
        games: vec![
            GameInfo { id: 900_001, name: "7 Up & Down" },
            GameInfo { id: 900_002, name: "Roulette" },
            GameInfo { id: 900_003, name: "Teen Patti" },
            GameInfo { id: 900_004, name: "Dragon Tiger" },
        ],
    })
}

fn require_amount(request: &GamePlayRequest) -> Result<f64, ApiError> {
    match request.amount {
        Some(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ApiError::bad_request("Invalid amount")),
    }
}

/// POST /api/games/7updown/play
pub async fn seven_up_down_handler(
    Json(request): Json<GamePlayRequest>,
) -> Result<Json<GameResponse<SevenUpDownResult>>, ApiError> {
    let selection = match request.selection.as_deref() {
        Some("up") => SevenSelection::Up,
        Some("down") => SevenSelection::Down,
        Some("seven") => SevenSelection::Seven,
        _ => {
            return Err(ApiError::bad_request(
                "Invalid selection. Use one of: up, down, seven",
            ))
        }
    };
    let amount = require_amount(&request)?;

    let mut source = ThreadRngSource::new();
    let result = seven_up_down::play(selection, amount, &mut source)?;
    Ok(Json(GameResponse::new(result)))
}

/// POST /api/games/roulette/spin
pub async fn roulette_handler(
    Json(request): Json<RouletteSpinRequest>,
) -> Result<Json<GameResponse<RouletteResult>>, ApiError> {
    let mut source = ThreadRngSource::new();
    let result = roulette::spin(&request.bets, &mut source)?;
    Ok(Json(GameResponse::new(result)))
}

/// POST /api/games/teenpatti/deal
pub async fn teen_patti_handler(
    Json(request): Json<GamePlayRequest>,
) -> Result<Json<GameResponse<TeenPattiResult>>, ApiError> {
    let selection = match request.selection.as_deref() {
        Some("playerA") => TeenPattiSelection::PlayerA,
        Some("playerB") => TeenPattiSelection::PlayerB,
        Some("tie") => TeenPattiSelection::Tie,
        _ => return Err(ApiError::bad_request("Invalid selection")),
    };
    let amount = require_amount(&request)?;

    let mut source = ThreadRngSource::new();
    let result = teen_patti::deal(selection, amount, &mut source)?;
    Ok(Json(GameResponse::new(result)))
}

/// POST /api/games/dragon-tiger/deal
pub async fn dragon_tiger_handler(
    Json(request): Json<GamePlayRequest>,
) -> Result<Json<GameResponse<DragonTigerResult>>, ApiError> {
    let selection = match request.selection.as_deref() {
        Some("dragon") => DragonTigerSelection::Dragon,
        Some("tiger") => DragonTigerSelection::Tiger,
        Some("tie") => DragonTigerSelection::Tie,
        _ => return Err(ApiError::bad_request("Invalid selection")),
    };
    let amount = require_amount(&request)?;

    let mut source = ThreadRngSource::new();
    let result = dragon_tiger::deal(selection, amount, &mut source)?;
    Ok(Json(GameResponse::new(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lobby_lists_all_four_games() {
        let lobby = games_lobby_handler().await;
        assert_eq!(lobby.0.games.len(), 4);
        assert!(lobby.0.games.iter().any(|g| g.name == "Teen Patti"));
    }

    #[tokio::test]
    async fn test_unknown_selection_is_bad_request() {
        let request = GamePlayRequest {
            selection: Some("sideways".into()),
            amount: Some(10.0),
        };
        let err = seven_up_down_handler(Json(request)).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_amount_is_bad_request() {
        let request = GamePlayRequest {
            selection: Some("dragon".into()),
            amount: None,
        };
        let err = dragon_tiger_handler(Json(request)).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_play_round_trips_through_envelope() {
        let request = GamePlayRequest {
            selection: Some("up".into()),
            amount: Some(10.0),
        };
        let response = seven_up_down_handler(Json(request)).await.unwrap();
        assert!(response.0.success);
        assert_eq!(response.0.result.amount, 10.0);
    }
}
