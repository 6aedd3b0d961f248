use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

use crate::core::MatchingEngine;
use crate::models::{
    AdvanceRequest, DecideRequest, Decision, Direction, ErrorResponse, DecideResponse,
    HealthResponse, SessionResponse, StartSessionRequest,
};
use crate::services::{DirectoryClient, DirectoryError, SessionStore, SwipeSession};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub sessions: SessionStore,
    pub engine: MatchingEngine,
    /// Pause before reporting the post-decision active candidate, so the
    /// client's dismissal animation finishes first.
    pub transition_delay: Duration,
}

/// Configure all session-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/sessions", web::post().to(start_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(end_session))
        .route("/sessions/{id}/decide", web::post().to(decide))
        .route("/sessions/{id}/advance", web::post().to(advance));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let backend_healthy = state.directory.health_check().await;

    let status = if backend_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn directory_error_response(context: &str, err: &DirectoryError) -> HttpResponse {
    let status_code = match err {
        DirectoryError::NotFound(_) => 404,
        DirectoryError::Unauthorized => 502,
        _ => 502,
    };

    let body = ErrorResponse {
        error: context.to_string(),
        message: err.to_string(),
        status_code,
    };

    match status_code {
        404 => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadGateway().json(body),
    }
}

fn snapshot(state: &AppState, session_id: &str, session: &SwipeSession) -> SessionResponse {
    let now = chrono::Utc::now();

    SessionResponse {
        session_id: session_id.to_string(),
        active: state.engine.active_card(&session.state, &session.user, now),
        cursor: session.state.cursor,
        remaining: session.state.remaining(),
    }
}

/// Start a swipe session
///
/// POST /api/v1/sessions
///
/// Fetches the acting user and the full profile directory, builds the
/// candidate queue, and stores it under a fresh session id. A directory
/// fetch failure produces an error and no session; no partial queue is
/// ever served.
async fn start_session(
    state: web::Data<AppState>,
    req: web::Json<StartSessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for start_session request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user = match state.directory.get_user(&req.user_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to fetch user {}: {}", req.user_id, e);
            return directory_error_response("Failed to fetch user", &e);
        }
    };

    let directory = match state.directory.get_all_users().await {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::error!("Failed to fetch directory for {}: {}", req.user_id, e);
            return directory_error_response("Failed to fetch candidate directory", &e);
        }
    };

    let swipe_state = state.engine.load_candidates(directory, &user);

    tracing::info!(
        "Loaded {} candidates for user {}",
        swipe_state.remaining(),
        user.user_id
    );

    let now = chrono::Utc::now();
    let active = state.engine.active_card(&swipe_state, &user, now);
    let cursor = swipe_state.cursor;
    let remaining = swipe_state.remaining();

    let session_id = state.sessions.create(user, swipe_state).await;

    HttpResponse::Ok().json(SessionResponse {
        session_id,
        active,
        cursor,
        remaining,
    })
}

/// Current session snapshot
///
/// GET /api/v1/sessions/{id}
async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let session_id = path.into_inner();

    let Some(session) = state.sessions.get(&session_id).await else {
        return session_not_found(&session_id);
    };

    let guard = session.lock().await;
    HttpResponse::Ok().json(snapshot(&state, &session_id, &guard))
}

/// Decide on the active candidate
///
/// POST /api/v1/sessions/{id}/decide
///
/// Request body:
/// ```json
/// { "decision": "accept|reject" }
/// ```
///
/// The queue and cursor mutation is applied optimistically before the
/// like/dislike write is awaited; a failed write is reported via
/// `persisted: false` and logged, never rolled back. The decision is
/// retried implicitly by the next session load, which recomputes the queue
/// from whatever the store holds.
async fn decide(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<DecideRequest>,
) -> impl Responder {
    let session_id = path.into_inner();

    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let decision = match req.decision.to_lowercase().as_str() {
        "accept" => Decision::Accept,
        "reject" => Decision::Reject,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid decision".to_string(),
                message: "Decision must be one of: accept, reject".to_string(),
                status_code: 400,
            });
        }
    };

    let Some(session) = state.sessions.get(&session_id).await else {
        return session_not_found(&session_id);
    };

    // Holding the lock across the whole operation serializes decides
    // against this queue.
    let mut guard = session.lock().await;

    let Some(outcome) = state.engine.decide(&guard.state, &guard.user, decision) else {
        // Out-of-range cursor (double-tap on an exhausted queue). Leave
        // the session untouched.
        tracing::info!(
            "Ignoring decide with no active candidate in session {}",
            session_id
        );
        return HttpResponse::Conflict().json(ErrorResponse {
            error: "No active candidate".to_string(),
            message: "The candidate queue is exhausted".to_string(),
            status_code: 409,
        });
    };

    guard.state = outcome.state;
    guard.user = outcome.user;

    let persist_result = match decision {
        Decision::Accept => {
            state
                .directory
                .like_user(&guard.user, &outcome.decided_user_id)
                .await
        }
        Decision::Reject => {
            state
                .directory
                .dislike_user(&guard.user, &outcome.decided_user_id)
                .await
        }
    };

    let persisted = match persist_result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                "Decision {} -> {} applied locally but not persisted: {}",
                guard.user.user_id,
                outcome.decided_user_id,
                e
            );
            false
        }
    };

    // Dismissal animation window before the next candidate is reported.
    tokio::time::sleep(state.transition_delay).await;

    let now = chrono::Utc::now();
    let response = DecideResponse {
        session_id: session_id.clone(),
        decided_user_id: outcome.decided_user_id,
        persisted,
        active: state.engine.active_card(&guard.state, &guard.user, now),
        cursor: guard.state.cursor,
        remaining: guard.state.remaining(),
    };

    HttpResponse::Ok().json(response)
}

/// Move the cursor without deciding
///
/// POST /api/v1/sessions/{id}/advance
///
/// Request body:
/// ```json
/// { "direction": "next|prev" }
/// ```
async fn advance(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AdvanceRequest>,
) -> impl Responder {
    let session_id = path.into_inner();

    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let direction = match req.direction.to_lowercase().as_str() {
        "next" => Direction::Next,
        "prev" => Direction::Prev,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid direction".to_string(),
                message: "Direction must be one of: next, prev".to_string(),
                status_code: 400,
            });
        }
    };

    let Some(session) = state.sessions.get(&session_id).await else {
        return session_not_found(&session_id);
    };

    let mut guard = session.lock().await;
    guard.state = state.engine.advance(&guard.state, direction);

    HttpResponse::Ok().json(snapshot(&state, &session_id, &guard))
}

/// Discard a session
///
/// DELETE /api/v1/sessions/{id}
async fn end_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let session_id = path.into_inner();
    state.sessions.remove(&session_id).await;
    HttpResponse::NoContent().finish()
}

fn session_not_found(session_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Session not found".to_string(),
        message: format!("No live session with id {}", session_id),
        status_code: 404,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
