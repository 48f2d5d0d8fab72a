//! One-shot flash messages carried in a short-lived cookie.
//!
//! A redirecting handler sets the cookie; the next rendered page extracts
//! it, shows it as an auto-dismissing alert, and clears the cookie in the
//! same response. There is deliberately no server-side state involved.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::Markup;

use crate::constants::FLASH_COOKIE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// A message to show once on the next rendered page.
#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// Extractor for a pending flash message, if any.
#[derive(Debug, Clone)]
pub struct IncomingFlash(pub Option<FlashMessage>);

#[async_trait]
impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_flash(parts)))
    }
}

fn read_flash(parts: &Parts) -> Option<FlashMessage> {
    let cookies = parts.headers.get("cookie")?.to_str().ok()?;
    let raw = cookies.split(';').find_map(|cookie| {
        cookie
            .trim()
            .strip_prefix(FLASH_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
    })?;

    let (level, encoded) = raw.split_once(':')?;
    let level = FlashLevel::from_str(level)?;
    let message = urlencoding::decode(encoded).ok()?.into_owned();
    if message.is_empty() {
        return None;
    }
    Some(FlashMessage { level, message })
}

/// Redirect to `to`, flashing `message` on the destination page.
pub fn flash_redirect(to: &str, level: FlashLevel, message: &str) -> Response {
    let value = format!(
        "{FLASH_COOKIE}={}:{}; Path=/; Max-Age=60; HttpOnly",
        level.as_str(),
        urlencoding::encode(message)
    );
    ([(header::SET_COOKIE, value)], Redirect::to(to)).into_response()
}

/// Render a page, clearing the flash cookie when one was consumed.
pub fn page(markup: Markup, flash: &IncomingFlash) -> Response {
    let html = Html(markup.into_string());
    if flash.0.is_some() {
        let clear = format!("{FLASH_COOKIE}=; Path=/; Max-Age=0");
        ([(header::SET_COOKIE, clear)], html).into_response()
    } else {
        html.into_response()
    }
}
