use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::{USERNAME_KEY, USER_ID_KEY};

/// Administrator attributed to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Reads the logged-in identity from the session, if any.
pub async fn current_user(
    session: &Session,
) -> Result<Option<CurrentUser>, tower_sessions::session::Error> {
    let id = session.get::<i64>(USER_ID_KEY).await?;
    let username = session.get::<String>(USERNAME_KEY).await?;

    Ok(match (id, username) {
        (Some(id), Some(username)) => Some(CurrentUser { id, username }),
        _ => None,
    })
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match current_user(&session).await {
            Ok(Some(user)) => Ok(user),
            _ => Err(Redirect::to("/login").into_response()),
        }
    }
}
