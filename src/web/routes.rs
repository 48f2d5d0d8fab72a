use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::routing::{delete, get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::flash::{self, flash_redirect, FlashLevel, IncomingFlash};
use super::{pages, AppState};
use crate::auth::{
    expiry_timestamp, generate_session_token, verify_password, MaybeUser, RequireUser,
};
use crate::config::StoreMode;
use crate::constants::SESSION_COOKIE;
use crate::db as queries;
use crate::store::{NewPost, StoreError};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/post/:id", get(post_detail))
        .route("/login", get(login_page).post(login_post))
        .route("/logout", get(logout))
        .route("/admin", get(admin_dashboard).post(admin_create))
        .route("/admin/delete/:id", post(admin_delete))
        .route("/healthz", get(health))
        .route("/api/posts", get(api_list_posts).post(api_create_post))
        .route("/api/posts/:id", delete(api_delete_post))
        .route("/api/login", post(api_login))
}

// ========== HTML Routes ==========

async fn home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    incoming: IncomingFlash,
) -> Response {
    let (posts, load_error) = match state.store.list().await {
        Ok(posts) => (posts, None),
        Err(e) => {
            tracing::error!("Failed to list posts: {e:#}");
            (Vec::new(), Some("Could not load posts from the backend."))
        }
    };

    let markup = pages::render_home_page(&pages::HomeParams {
        posts: &posts,
        user: user.as_ref(),
        flash: incoming.0.as_ref(),
        load_error,
        admin_enabled: state.store.supports_mutation(),
    });
    flash::page(markup, &incoming)
}

async fn post_detail(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<i64>,
) -> Response {
    match state.store.get(id).await {
        Ok(post) => Html(
            pages::render_post_page(&pages::PostDetailParams {
                post: &post,
                user: user.as_ref(),
                admin_enabled: state.store.supports_mutation(),
            })
            .into_string(),
        )
        .into_response(),
        Err(StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Html(pages::render_not_found(user.as_ref()).into_string()),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch post {id}: {e:#}");
            flash_redirect("/", FlashLevel::Error, "Could not load the case file.")
        }
    }
}

async fn login_page(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    incoming: IncomingFlash,
) -> Response {
    if state.config.store_mode == StoreMode::Fixed {
        return Redirect::to("/").into_response();
    }
    if user.is_some() {
        return Redirect::to("/admin").into_response();
    }
    flash::page(pages::render_login_page(None, incoming.0.as_ref()), &incoming)
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

async fn login_post(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match authenticate(&state, &form.username, &form.password).await {
        Ok(AuthOutcome::Success { cookie_value, .. }) => (
            [(
                header::SET_COOKIE,
                session_cookie(&cookie_value, state.config.session_ttl_secs),
            )],
            Redirect::to("/admin"),
        )
            .into_response(),
        Ok(AuthOutcome::Invalid) => {
            Html(pages::render_login_page(Some("Invalid credentials."), None).into_string())
                .into_response()
        }
        Ok(AuthOutcome::Disabled) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::error!("Login failed: {e:#}");
            Html(pages::render_login_page(Some("Login service unavailable."), None).into_string())
                .into_response()
        }
    }
}

async fn logout(State(state): State<AppState>, headers: axum::http::HeaderMap) -> Response {
    if let Some(value) = cookie_value(&headers, SESSION_COOKIE) {
        state.sessions.revoke(&value).await;
        if let Some(db) = state.db.as_ref() {
            if let Err(e) = queries::delete_session(db.pool(), &value).await {
                tracing::error!("Failed to delete session: {e:#}");
            }
        }
    }
    if let Some(local) = state.local.as_ref() {
        local.forget_user().await;
    }

    (
        AppendHeaders([(header::SET_COOKIE, session_cookie("", 0))]),
        flash_redirect("/", FlashLevel::Success, "Logged out."),
    )
        .into_response()
}

async fn admin_dashboard(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    incoming: IncomingFlash,
) -> Response {
    if !state.store.supports_mutation() {
        return Redirect::to("/").into_response();
    }

    let (posts, load_error) = match state.store.list().await {
        Ok(posts) => (posts, None),
        Err(e) => {
            tracing::error!("Failed to list posts: {e:#}");
            (Vec::new(), Some("Could not load posts from the backend."))
        }
    };

    let markup = pages::render_admin_page(&pages::AdminParams {
        posts: &posts,
        user: &user,
        flash: incoming.0.as_ref(),
        load_error,
    });
    flash::page(markup, &incoming)
}

/// Create form data. `files` is raw text, one name per line.
#[derive(Debug, Deserialize)]
pub struct CreatePostForm {
    title: String,
    author: String,
    content: String,
    #[serde(default)]
    files: String,
}

async fn admin_create(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Form(form): Form<CreatePostForm>,
) -> Response {
    let title = form.title.trim();
    let author = form.author.trim();
    let content = form.content.trim();

    if title.is_empty() || author.is_empty() || content.is_empty() {
        return flash_redirect("/admin", FlashLevel::Error, "Title/Author/Content required.");
    }

    let new = NewPost {
        title: title.to_string(),
        author: author.to_string(),
        content: content.to_string(),
        files: parse_file_names(&form.files),
    };

    match state.store.create(new).await {
        Ok(_) => flash_redirect("/admin", FlashLevel::Success, "Case file added successfully."),
        Err(StoreError::ReadOnly) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::error!("Failed to create post: {e:#}");
            flash_redirect("/admin", FlashLevel::Error, "Could not save the case file.")
        }
    }
}

async fn admin_delete(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Response {
    match state.store.delete(id).await {
        Ok(()) => flash_redirect("/admin", FlashLevel::Success, "Case file deleted."),
        Err(StoreError::NotFound(_)) => {
            flash_redirect("/admin", FlashLevel::Error, "No such case file.")
        }
        Err(StoreError::ReadOnly) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::error!("Failed to delete post {id}: {e:#}");
            flash_redirect("/admin", FlashLevel::Error, "Could not delete the case file.")
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

// ========== JSON API ==========

async fn api_list_posts(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => {
            tracing::error!("Failed to list posts: {e:#}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "backend unavailable"})),
            )
                .into_response()
        }
    }
}

async fn api_create_post(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(new): Json<NewPost>,
) -> Response {
    if user.is_none() {
        return unauthorized();
    }

    match state.store.create(new).await {
        Ok(post) => (StatusCode::CREATED, Json(post)).into_response(),
        Err(StoreError::ReadOnly) => read_only(),
        Err(e) => {
            tracing::error!("Failed to create post: {e:#}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "backend unavailable"})),
            )
                .into_response()
        }
    }
}

async fn api_delete_post(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<i64>,
) -> Response {
    if user.is_none() {
        return unauthorized();
    }

    match state.store.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "post not found"})),
        )
            .into_response(),
        Err(StoreError::ReadOnly) => read_only(),
        Err(e) => {
            tracing::error!("Failed to delete post {id}: {e:#}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "backend unavailable"})),
            )
                .into_response()
        }
    }
}

async fn api_login(State(state): State<AppState>, Json(form): Json<LoginForm>) -> Response {
    match authenticate(&state, &form.username, &form.password).await {
        Ok(AuthOutcome::Success {
            cookie_value,
            username,
        }) => (
            [(
                header::SET_COOKIE,
                session_cookie(&cookie_value, state.config.session_ttl_secs),
            )],
            Json(json!({"username": username})),
        )
            .into_response(),
        Ok(AuthOutcome::Invalid) => unauthorized(),
        Ok(AuthOutcome::Disabled) => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "login disabled"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Login failed: {e:#}");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "login unavailable"})),
            )
                .into_response()
        }
    }
}

// ========== Authentication ==========

enum AuthOutcome {
    Success {
        /// Session token for the cookie. Database mode records it in the
        /// sessions table, the other modes in the in-memory registry.
        cookie_value: String,
        username: String,
    },
    Invalid,
    Disabled,
}

async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> anyhow::Result<AuthOutcome> {
    match state.config.store_mode {
        StoreMode::Fixed => Ok(AuthOutcome::Disabled),
        StoreMode::Database => authenticate_database(state, username, password).await,
        StoreMode::Local => authenticate_local(state, username, password).await,
        StoreMode::Remote => authenticate_remote(state, username, password).await,
    }
}

async fn authenticate_database(
    state: &AppState,
    username: &str,
    password: &str,
) -> anyhow::Result<AuthOutcome> {
    let db = state
        .db
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("database mode without a database"))?;

    let Some(user) = queries::get_user_by_username(db.pool(), username).await? else {
        return Ok(AuthOutcome::Invalid);
    };

    if !verify_password(password, &user.password_hash)? {
        return Ok(AuthOutcome::Invalid);
    }

    let token = generate_session_token();
    let expires_at = expiry_timestamp(state.config.session_ttl_secs);
    queries::create_session(db.pool(), user.id, &token, &expires_at).await?;

    Ok(AuthOutcome::Success {
        cookie_value: token,
        username: user.username,
    })
}

async fn authenticate_local(
    state: &AppState,
    username: &str,
    password: &str,
) -> anyhow::Result<AuthOutcome> {
    let (expected_user, expected_pass) = match (
        state.config.admin_username.as_deref(),
        state.config.admin_password.as_deref(),
    ) {
        (Some(u), Some(p)) => (u, p),
        _ => return Ok(AuthOutcome::Disabled),
    };

    if username != expected_user || password != expected_pass {
        return Ok(AuthOutcome::Invalid);
    }

    if let Some(local) = state.local.as_ref() {
        local.remember_user(username).await;
    }

    Ok(AuthOutcome::Success {
        cookie_value: state.sessions.issue(username).await,
        username: username.to_string(),
    })
}

async fn authenticate_remote(
    state: &AppState,
    username: &str,
    password: &str,
) -> anyhow::Result<AuthOutcome> {
    let remote = state
        .remote
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("remote mode without a client"))?;

    match remote.login(username, password).await? {
        Some(confirmed) => Ok(AuthOutcome::Success {
            cookie_value: state.sessions.issue(&confirmed).await,
            username: confirmed,
        }),
        None => Ok(AuthOutcome::Invalid),
    }
}

// ========== Helpers ==========

fn session_cookie(value: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax")
}

fn cookie_value(headers: &axum::http::HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|cookie| {
        cookie
            .trim()
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|v| !v.is_empty())
            .map(String::from)
    })
}

fn parse_file_names(raw: &str) -> Vec<String> {
    raw.lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "authentication required"})),
    )
        .into_response()
}

fn read_only() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"error": "this site is read-only"})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_names() {
        assert_eq!(
            parse_file_names("a.pdf\nb.png, c.txt\n\n  "),
            vec!["a.pdf", "b.png", "c.txt"]
        );
        assert!(parse_file_names("").is_empty());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", 3600);
        assert!(cookie.starts_with("fs_session=tok"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_session_cookie_clearing_form() {
        let cookie = session_cookie("", 0);
        assert!(cookie.starts_with("fs_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
