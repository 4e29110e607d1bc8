use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

use super::{is_safe_return_path, DEFAULT_LOGIN_REDIRECT, RETURN_TO_KEY, USER_ID_KEY};
use crate::flash::{push_flash, FlashLevel};

pub async fn require_auth(session: Session, request: Request, next: Next) -> Response {
    if let Ok(Some(_user_id)) = session.get::<i64>(USER_ID_KEY).await {
        return next.run(request).await;
    }

    debug!("Unauthenticated request to {}", request.uri().path());

    if request.method() == Method::GET {
        let path = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        if is_safe_return_path(path) && path != "/logout" {
            let _ = session.insert(RETURN_TO_KEY, path).await;
        }
    }
    let _ = push_flash(&session, FlashLevel::Info, "Please log in to access this page.").await;

    Redirect::to("/login").into_response()
}

pub async fn redirect_if_authenticated(session: Session, request: Request, next: Next) -> Response {
    if let Ok(Some(_user_id)) = session.get::<i64>(USER_ID_KEY).await {
        Redirect::to(DEFAULT_LOGIN_REDIRECT).into_response()
    } else {
        next.run(request).await
    }
}
