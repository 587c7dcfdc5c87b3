use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use server_api::{add_user, add_user_form, get_user, list_users, ApiContext};
use shared::{
    domain::{NewUser, UserId},
    error::{ApiError, ErrorCode},
    protocol::{ActionResult, ModelState},
};
use storage::Storage;
use tracing::{error, info};

mod config;

use config::{load_settings, normalize_database_url};

#[derive(Clone)]
struct AppState {
    api: ApiContext,
    storage: Storage,
}

#[derive(Debug, Deserialize)]
struct FindUserQuery {
    id: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    let api = ApiContext {
        repo: Arc::new(storage.clone()),
    };

    let state = AppState { api, storage };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/users", get(http_list_users).post(http_add_user))
        .route("/users/new", get(http_add_user_form))
        .route("/users/find", get(http_find_user))
        .with_state(state)
}

async fn healthz(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    state.storage.health_check().await.map_err(|e| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new(ErrorCode::Internal, e.to_string())),
        )
    })?;
    Ok("ok")
}

async fn http_list_users(State(state): State<Arc<AppState>>) -> Response {
    match list_users(&state.api).await {
        Ok(result) => render(result),
        Err(e) => internal_error(e),
    }
}

async fn http_add_user_form() -> Response {
    render(add_user_form())
}

async fn http_add_user(
    State(state): State<Arc<AppState>>,
    Json(candidate): Json<NewUser>,
) -> Response {
    let model_state = bind_candidate(&candidate);
    match add_user(&state.api, candidate, &model_state).await {
        Ok(result) => render(result),
        Err(e) => internal_error(e),
    }
}

async fn http_find_user(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FindUserQuery>,
) -> Response {
    match get_user(&state.api, q.id.map(UserId)).await {
        Ok(result) => render(result),
        Err(e) => internal_error(e),
    }
}

fn bind_candidate(candidate: &NewUser) -> ModelState {
    let mut model_state = ModelState::default();
    if candidate.name.trim().is_empty() {
        model_state.add_error("Name", "Required");
    }
    if candidate.age < 0 {
        model_state.add_error("Age", "Must not be negative");
    }
    model_state
}

fn render<M: Serialize>(result: ActionResult<M>) -> Response {
    match result {
        ActionResult::View { .. } => (StatusCode::OK, Json(result)).into_response(),
        ActionResult::Redirect { ref action, .. } => {
            Redirect::to(route_for_action(action)).into_response()
        }
        ActionResult::BadRequest => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                ErrorCode::Validation,
                "missing required identifier",
            )),
        )
            .into_response(),
        ActionResult::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(ErrorCode::NotFound, "user not found")),
        )
            .into_response(),
    }
}

fn route_for_action(action: &str) -> &'static str {
    match action {
        "Index" => "/users",
        _ => "/",
    }
}

fn internal_error(err: ApiError) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
