//! Route definitions
//!
//! Betting and profile routes sit behind the bearer-token layer; games
//! and sports are public.

use crate::api::errors::ErrorResponse;
use crate::api::{games, handlers, handlers::AppState, middleware::auth_middleware};
use axum::{
    http::{StatusCode, Uri},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

/// Build the full API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/auth/profile", get(handlers::profile_handler))
        .route("/api/auth/logout", post(handlers::logout_handler))
        .route("/api/betting/place", post(handlers::place_bet_handler))
        // Older clients still post to the hyphenated path
        .route("/api/betting/place-bet", post(handlers::place_bet_handler))
        .route("/api/betting/my-bets", get(handlers::user_bets_handler))
        .route("/api/betting/summary", get(handlers::summary_handler))
        .route(
            "/api/betting/match/:match_id",
            get(handlers::match_market_handler),
        )
        .route(
            "/api/betting/cancel/:bet_id",
            put(handlers::cancel_bet_handler),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/api/auth/register", post(handlers::register_handler))
        .route("/api/auth/login", post(handlers::login_handler))
        .route("/api/sports/:sport", get(handlers::sports_handler))
        .route("/api/games", get(games::games_lobby_handler))
        .route("/api/games/7updown/play", post(games::seven_up_down_handler))
        .route("/api/games/roulette/spin", post(games::roulette_handler))
        .route("/api/games/teenpatti/deal", post(games::teen_patti_handler))
        .route(
            "/api/games/dragon-tiger/deal",
            post(games::dragon_tiger_handler),
        )
        .merge(protected)
        .fallback(fallback_handler)
        .with_state(state)
}

/// Enveloped 404 for undefined routes
async fn fallback_handler(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            message: format!("Route {} not found", uri.path()),
        }),
    )
}
