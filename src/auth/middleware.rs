use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::constants::SESSION_COOKIE;
use crate::db as queries;
use crate::web::AppState;

/// The logged-in user, as far as any view needs to know: a username, plus
/// the account id when the database backend is in use.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Option<i64>,
    pub username: String,
}

/// Current authenticated user (if any).
/// Use this extractor when authentication is optional.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = session_cookie(parts) else {
            return Ok(MaybeUser(None));
        };

        // The cookie always carries a token. Without a database it is
        // checked against the in-memory registry filled at login; a value
        // that was never issued is not a session.
        let Some(db) = state.db.as_ref() else {
            return Ok(match state.sessions.username(&value).await {
                Some(username) => MaybeUser(Some(CurrentUser { id: None, username })),
                None => MaybeUser(None),
            });
        };

        let session = match queries::get_session_by_token(db.pool(), &value).await {
            Ok(Some(s)) => s,
            _ => return Ok(MaybeUser(None)),
        };

        let now = chrono::Utc::now().to_rfc3339();
        if session.expires_at < now {
            // Clean up expired session
            let _ = queries::delete_session(db.pool(), &value).await;
            return Ok(MaybeUser(None));
        }

        let user = match queries::get_user_by_id(db.pool(), session.user_id).await {
            Ok(Some(u)) => u,
            _ => return Ok(MaybeUser(None)),
        };

        Ok(MaybeUser(Some(CurrentUser {
            id: Some(user.id),
            username: user.username,
        })))
    }
}

/// Current authenticated user (required).
/// Redirects to the login page when no session is present.
#[derive(Debug, Clone)]
pub struct RequireUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match MaybeUser::from_request_parts(parts, state).await {
            Ok(MaybeUser(Some(user))) => Ok(RequireUser(user)),
            _ => Err(Redirect::to("/login").into_response()),
        }
    }
}

/// Extract the session cookie value from the request, if present.
fn session_cookie(parts: &Parts) -> Option<String> {
    let cookies = parts.headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|cookie| {
        cookie
            .trim()
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|v| !v.is_empty())
            .map(String::from)
    })
}
