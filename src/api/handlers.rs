//! Request handlers: health, auth, betting and sports
//!
//! Handlers validate the envelope-level input, delegate to the core and
//! wrap results. Game handlers live in `api::games`.

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::models::*;
use crate::auth::CredentialService;
use crate::betting::{MarketAggregator, MatchMarket, PlaceBetInput, WagerLedger};
use crate::models::{BetStatus, BetType, UserAccount};
use crate::repository::{BetFilter, UserAccountRepository};
use crate::sports::{FeedResponse, MatchFeed};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Shared application state
pub struct AppState {
    pub ledger: WagerLedger,
    pub market: MarketAggregator,
    pub users: Arc<dyn UserAccountRepository>,
    pub credentials: Arc<dyn CredentialService>,
    pub feed: Arc<dyn MatchFeed>,
    pub environment: String,
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running".to_string(),
        timestamp: Utc::now(),
        environment: state.environment.clone(),
    })
}

/// GET /
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        success: true,
        message: "Welcome to Bibet API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ---- auth ----

/// POST /api/auth/register
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    // Missing fields read as empty and fail the same checks
    let full_name = request.full_name.as_deref().unwrap_or("").trim();
    let email = request.email.as_deref().unwrap_or("").trim();
    let password = request.password.as_deref().unwrap_or("");

    if full_name.len() < 2 || full_name.len() > 50 {
        return Err(ApiError::bad_request(
            "Full name must be between 2 and 50 characters",
        ));
    }
    if !email.contains('@') {
        return Err(ApiError::bad_request("Please provide a valid email address"));
    }
    if password.len() < 3 {
        return Err(ApiError::bad_request(
            "Password must be at least 3 characters long",
        ));
    }

    let digest = state.credentials.hash_password(password);
    let mut user = UserAccount::new(full_name.to_string(), email.to_lowercase(), digest);
    user.last_login = Some(Utc::now());
    state.users.insert(&user).await?;

    let token = state.credentials.issue_token(&user.id);
    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "User registered successfully".to_string(),
            data: AuthData {
                user: UserView::from(&user),
                token: Some(token),
            },
        }),
    ))
}

/// POST /api/auth/login
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, password) = match (request.email, request.password) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(ApiError::bad_request("Email and password are required")),
    };

    let mut user = state
        .users
        .find_by_email(email.trim())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !user.is_active {
        return Err(ApiError::unauthorized(
            "Account is deactivated. Please contact support.",
        ));
    }
    if !state
        .credentials
        .verify_password(&password, &user.password_digest)
    {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    user.last_login = Some(Utc::now());
    state.users.update(&user).await?;

    let token = state.credentials.issue_token(&user.id);
    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        data: AuthData {
            user: UserView::from(&user),
            token: Some(token),
        },
    }))
}

/// GET /api/auth/profile
pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(&auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Profile retrieved successfully".to_string(),
        data: AuthData {
            user: UserView::from(&user),
            token: None,
        },
    }))
}

/// POST /api/auth/logout
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Json<MessageResponse> {
    state.credentials.revoke_token(&auth.token);
    Json(MessageResponse {
        success: true,
        message: "Logout successful".to_string(),
    })
}

// ---- betting ----

fn parse_bet_type(raw: &str) -> Result<BetType, ApiError> {
    match raw {
        "back" => Ok(BetType::Back),
        "lay" => Ok(BetType::Lay),
        _ => Err(ApiError::bad_request("betType must be back or lay")),
    }
}

fn parse_status(raw: &str) -> Result<BetStatus, ApiError> {
    match raw {
        "pending" => Ok(BetStatus::Pending),
        "matched" => Ok(BetStatus::Matched),
        "cancelled" => Ok(BetStatus::Cancelled),
        "settled" => Ok(BetStatus::Settled),
        "void" => Ok(BetStatus::Void),
        _ => Err(ApiError::bad_request("Unknown bet status")),
    }
}

/// POST /api/betting/place
pub async fn place_bet_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<PlaceBetRequest>,
) -> Result<(StatusCode, Json<PlaceBetResponse>), ApiError> {
    let (match_id, runner, bet_type, odds, stake) = match (
        request.match_id,
        request.runner,
        request.bet_type,
        request.odds,
        request.stake,
    ) {
        (Some(m), Some(r), Some(t), Some(o), Some(s)) => (m, r, t, o, s),
        _ => return Err(ApiError::bad_request("All fields are required")),
    };

    let input = PlaceBetInput {
        match_id,
        runner,
        bet_type: parse_bet_type(&bet_type)?,
        odds,
        stake,
        match_details: request.match_details,
    };

    let bet = state.ledger.place_bet(&auth.user_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlaceBetResponse {
            success: true,
            message: "Bet placed successfully".to_string(),
            bet,
        }),
    ))
}

/// GET /api/betting/my-bets?status=&matchId=
pub async fn user_bets_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<UserBetsQuery>,
) -> Result<Json<UserBetsResponse>, ApiError> {
    let filter = BetFilter {
        status: query.status.as_deref().map(parse_status).transpose()?,
        match_id: query.match_id,
    };
    let bets = state.ledger.get_user_bets(&auth.user_id, &filter).await?;
    Ok(Json(UserBetsResponse {
        success: true,
        bets,
    }))
}

/// GET /api/betting/match/:matchId
pub async fn match_market_handler(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> Result<Json<GameResponse<MatchMarket>>, ApiError> {
    let market = state.market.get_match_market(&match_id).await?;
    Ok(Json(GameResponse::new(market)))
}

/// PUT /api/betting/cancel/:betId
pub async fn cancel_bet_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(bet_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.ledger.cancel_bet(&auth.user_id, &bet_id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Bet cancelled successfully".to_string(),
    }))
}

/// GET /api/betting/summary
pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = state.ledger.get_betting_summary(&auth.user_id).await?;
    Ok(Json(SummaryResponse {
        success: true,
        summary: summary.summary,
        balance: summary.balance,
    }))
}

// ---- sports ----

/// GET /api/sports/:sport
pub async fn sports_handler(
    State(state): State<Arc<AppState>>,
    Path(sport): Path<String>,
) -> Result<Json<GameResponse<FeedResponse>>, ApiError> {
    let feed = state.feed.list_matches(&sport).await?;
    Ok(Json(GameResponse::new(feed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::InMemoryCredentials;
    use crate::repository::{InMemoryBetRepository, InMemoryUserRepository};
    use crate::sports::DemoFeed;

    fn test_state() -> Arc<AppState> {
        let users = InMemoryUserRepository::new();
        let bets = InMemoryBetRepository::new();
        Arc::new(AppState {
            ledger: WagerLedger::new(users.clone(), bets.clone()),
            market: MarketAggregator::new(bets, users.clone()),
            users,
            credentials: InMemoryCredentials::new("test-salt"),
            feed: DemoFeed::new(),
            environment: "development".into(),
        })
    }

    #[tokio::test]
    async fn test_register_missing_fields_is_bad_request() {
        let state = test_state();
        let err = register_handler(
            State(state),
            Json(RegisterRequest {
                full_name: None,
                email: Some("a@example.com".into()),
                password: Some("secret".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Full name must be between 2 and 50 characters");
    }

    #[tokio::test]
    async fn test_register_missing_password_is_bad_request() {
        let state = test_state();
        let err = register_handler(
            State(state),
            Json(RegisterRequest {
                full_name: Some("Asha".into()),
                email: Some("a@example.com".into()),
                password: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Password must be at least 3 characters long");
    }

    #[tokio::test]
    async fn test_login_missing_fields_is_bad_request() {
        let state = test_state();
        let err = login_handler(
            State(state),
            Json(LoginRequest {
                email: Some("a@example.com".into()),
                password: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Email and password are required");
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = test_state();
        let (status, _) = register_handler(
            State(state.clone()),
            Json(RegisterRequest {
                full_name: Some("Asha".into()),
                email: Some("Asha@Example.com".into()),
                password: Some("secret".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let response = login_handler(
            State(state),
            Json(LoginRequest {
                email: Some("asha@example.com".into()),
                password: Some("secret".into()),
            }),
        )
        .await
        .unwrap();
        assert!(response.0.data.token.is_some());
    }
}
