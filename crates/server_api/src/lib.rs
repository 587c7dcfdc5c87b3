use std::sync::Arc;

use shared::{
    domain::{NewUser, User, UserId},
    error::{ApiError, ErrorCode},
    protocol::{ActionResult, ModelState},
};
use storage::UserRepository;
use tracing::debug;

#[derive(Clone)]
pub struct ApiContext {
    pub repo: Arc<dyn UserRepository>,
}

pub async fn list_users(ctx: &ApiContext) -> Result<ActionResult<Vec<User>>, ApiError> {
    let users = ctx.repo.get_all().await.map_err(internal)?;
    Ok(ActionResult::view(users))
}

pub fn add_user_form() -> ActionResult<NewUser> {
    ActionResult::empty_view()
}

pub async fn add_user(
    ctx: &ApiContext,
    candidate: NewUser,
    model_state: &ModelState,
) -> Result<ActionResult<NewUser>, ApiError> {
    if !model_state.is_valid() {
        debug!(
            fields = model_state.errors().len(),
            "submission rejected by binder, re-rendering form"
        );
        return Ok(ActionResult::empty_view());
    }
    ctx.repo.create(candidate).await.map_err(internal)?;
    Ok(ActionResult::redirect_to("Index"))
}

pub async fn get_user(
    ctx: &ApiContext,
    id: Option<UserId>,
) -> Result<ActionResult<User>, ApiError> {
    let Some(id) = id else {
        return Ok(ActionResult::BadRequest);
    };
    let Some(user) = ctx.repo.get(id).await.map_err(internal)? else {
        return Ok(ActionResult::NotFound);
    };
    Ok(ActionResult::view(user))
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
