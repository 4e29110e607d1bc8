use crate::auth::{
    is_safe_return_path, DEFAULT_LOGIN_REDIRECT, RETURN_TO_KEY,
    USERNAME_KEY, USER_ID_KEY,
};
use crate::error::{AppError, Result};
use crate::flash::{push_flash, FlashLevel};
use crate::handlers::page::PageContext;
use crate::middleware::csrf::{get_or_create_csrf_token, validate_csrf_form_field};
use crate::services::auth_service::{AuthServiceError, LoginRequest};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter your username and password.";
pub const INVALID_CSRF_MESSAGE: &str =
    "Invalid security token. Please refresh the page and try again.";

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    page: PageContext,
    error: Option<String>,
    username: String,
    csrf_token: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    csrf_token: String,
}

async fn render_login(session: &Session, username: &str, error: Option<&str>) -> Result<Response> {
    let csrf_token = get_or_create_csrf_token(session).await?;

    let template = LoginTemplate {
        page: PageContext::load(session).await?,
        error: error.map(str::to_string),
        username: username.to_string(),
        csrf_token,
    };
    Ok(Html(template.render()?).into_response())
}

/// GET /login
pub async fn login_page(session: Session) -> Result<Response> {
    render_login(&session, "", None).await
}

/// POST /login
pub async fn login_handler(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if validate_csrf_form_field(&session, &form.csrf_token)
        .await
        .is_err()
    {
        return render_login(&session, &form.username, Some(INVALID_CSRF_MESSAGE)).await;
    }

    if form.username.trim().is_empty() || form.password.is_empty() {
        return render_login(&session, &form.username, Some(MISSING_CREDENTIALS_MESSAGE)).await;
    }

    let request = LoginRequest {
        username: form.username.clone(),
        password: form.password,
    };

    match app_state.auth_service.authenticate(request).await {
        Ok(user) => {
            // New session id on privilege change.
            session.cycle_id().await?;
            session.insert(USER_ID_KEY, user.id).await?;
            session.insert(USERNAME_KEY, &user.username).await?;

            info!("Administrator '{}' logged in", user.username);

            let redirect_url = match session.remove::<String>(RETURN_TO_KEY).await? {
                Some(return_to) if is_safe_return_path(&return_to) => return_to,
                _ => DEFAULT_LOGIN_REDIRECT.to_string(),
            };

            Ok(Redirect::to(&redirect_url).into_response())
        }
        Err(AuthServiceError::InvalidCredentials) => {
            warn!("Failed login attempt for '{}'", form.username);
            push_flash(&session, FlashLevel::Danger, INVALID_CREDENTIALS_MESSAGE).await?;
            render_login(&session, &form.username, None).await
        }
        Err(err) => Err(AppError::from(err)),
    }
}

/// GET /logout
pub async fn logout_handler(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    Redirect::to("/")
}
