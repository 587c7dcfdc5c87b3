use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum ActionResult<M> {
    View { model: Option<M> },
    Redirect {
        action: String,
        controller: Option<String>,
    },
    BadRequest,
    NotFound,
}

impl<M> ActionResult<M> {
    pub fn view(model: M) -> Self {
        Self::View { model: Some(model) }
    }

    pub fn empty_view() -> Self {
        Self::View { model: None }
    }

    pub fn redirect_to(action: impl Into<String>) -> Self {
        Self::Redirect {
            action: action.into(),
            controller: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }
}
