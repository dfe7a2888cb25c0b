//! HTTP layer for the activities API.
//!
//! Provides the JSON endpoints over the activity store and auth service:
//! - Public reads (`/activities`), teacher login/logout/status.
//! - Mutating signup/unregister routes behind a bearer-token middleware.
//! - Static assets mounted under `/static/` from a directory collaborator.

use std::collections::BTreeMap;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap},
    middleware::{self, Next},
    response::{Redirect, Response},
    routing::{delete, get, post},
    Extension, Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::AuthService;
use crate::error::ApiError;
use crate::models::{Activity, Session};
use crate::store::ActivityStore;

/// Shared app state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub activities: Arc<ActivityStore>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(activities: ActivityStore, auth: AuthService) -> Self {
        Self {
            activities: Arc::new(activities),
            auth: Arc::new(auth),
        }
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub username: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Deserialize)]
pub struct EmailParam {
    pub email: String,
}

/// Bearer token from the Authorization header, if any.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Middleware for the mutating routes: resolves the bearer token to an
/// active session and hands it to the handler via request extensions.
async fn require_teacher(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).map(str::to_owned);
    let session = state.auth.require(token.as_deref()).await?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Create the Axum router over the given state. Static assets are served
/// from `static_dir`; their content is not part of this service.
pub fn create_router(state: AppState, static_dir: impl AsRef<FsPath>) -> Router {
    let protected = Router::new()
        .route("/activities/:name/signup", post(signup_handler))
        .route("/activities/:name/unregister", delete(unregister_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_teacher,
        ));

    Router::new()
        .route("/", get(root_handler))
        .route("/activities", get(list_activities_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/auth/status", get(auth_status_handler))
        .merge(protected)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> Redirect {
    Redirect::to("/static/index.html")
}

async fn list_activities_handler(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, Activity>> {
    Json(state.activities.list().await)
}

async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = state.auth.login(&form.username, &form.password).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: session.token,
        username: session.username,
    }))
}

async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth.logout(bearer_token(&headers)).await?;
    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

/// Never fails; degrades to `authenticated: false` when no session
/// resolves.
async fn auth_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<AuthStatusResponse> {
    match state.auth.resolve(bearer_token(&headers)).await {
        Some(session) => Json(AuthStatusResponse {
            authenticated: true,
            username: Some(session.username),
        }),
        None => Json(AuthStatusResponse {
            authenticated: false,
            username: None,
        }),
    }
}

async fn signup_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(activity_name): Path<String>,
    Query(params): Query<EmailParam>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.activities.signup(&activity_name, &params.email).await?;
    tracing::info!(
        teacher = %session.username,
        activity = %activity_name,
        email = %params.email,
        "student signed up"
    );
    Ok(Json(MessageResponse {
        message: format!("Signed up {} for {}", params.email, activity_name),
    }))
}

async fn unregister_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(activity_name): Path<String>,
    Query(params): Query<EmailParam>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .activities
        .unregister(&activity_name, &params.email)
        .await?;
    tracing::info!(
        teacher = %session.username,
        activity = %activity_name,
        email = %params.email,
        "student unregistered"
    );
    Ok(Json(MessageResponse {
        message: format!("Unregistered {} from {}", params.email, activity_name),
    }))
}
