//! View models and the renderer boundary.
//!
//! Handlers never produce markup. They build a [`View`] naming a template
//! and carrying locals, and hand it to the configured [`Renderer`].

use axum::Json;
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value, json};

use library_auth::Principal;
use library_entity::UserRole;
use library_service::{FieldError, RequestContext};

use crate::error::ApiError;
use crate::state::AppState;

/// A template name plus the locals it is rendered with.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    /// Template identifier, e.g. `author/form`.
    pub template: &'static str,
    /// Page title.
    pub title: String,
    /// Template locals.
    #[serde(flatten)]
    pub locals: Map<String, Value>,
}

impl View {
    /// Start a view for the given template.
    pub fn new(template: &'static str, title: impl Into<String>) -> Self {
        Self {
            template,
            title: title.into(),
            locals: Map::new(),
        }
    }

    /// Attach a local.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.locals.insert(key.to_string(), value);
        self
    }

    /// Attach the ordered field errors of an invalid submission.
    pub fn with_errors(self, errors: &[FieldError]) -> Self {
        self.with("errors", errors)
    }
}

/// Turns view models into responses.
pub trait Renderer: Send + Sync + std::fmt::Debug + 'static {
    /// Render a view with the given status.
    fn render(&self, status: StatusCode, view: &View) -> Response;
}

/// Renders the view model itself as a JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, status: StatusCode, view: &View) -> Response {
        (status, Json(view)).into_response()
    }
}

/// Render a page for the current request.
///
/// Adds the request-wide locals (`is_authenticated`, `current_user` and the
/// pending flash messages, which are consumed here).
pub async fn page(state: &AppState, ctx: &RequestContext, view: View) -> Result<Response, ApiError> {
    let flash = state.sessions.take_flash(ctx.session_id).await?;
    let view = view
        .with("is_authenticated", ctx.is_authenticated())
        .with("current_user", ctx.principal().map(principal_view))
        .with("flash", flash);
    Ok(state.renderer.render(StatusCode::OK, &view))
}

/// A `302 Found` redirect.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Template projection of a principal.
pub fn principal_view(principal: &Principal) -> Value {
    json!({
        "id": principal.id,
        "username": principal.username,
        "fullname": principal.fullname,
        "email": principal.email,
        "role": principal.role,
        "role_name": principal.role.as_str(),
        "url": principal.url(),
    })
}

/// Role choices offered on the profile form.
pub fn role_options() -> Vec<Value> {
    UserRole::ALL
        .iter()
        .map(|role| json!({ "value": role.value(), "name": role.as_str() }))
        .collect()
}
