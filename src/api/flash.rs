// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! One-shot messages carried across a redirect in a cookie

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

pub const FLASH_COOKIE: &str = "flash";

/// Decode a flash cookie value; anything malformed yields no messages
pub fn decode_messages(value: &str) -> Vec<String> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

fn encode_messages(messages: &[String]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Queue `message` for the next page render
pub fn push(jar: CookieJar, message: &str) -> CookieJar {
    let mut messages = jar
        .get(FLASH_COOKIE)
        .map(|c| decode_messages(c.value()))
        .unwrap_or_default();
    messages.push(message.to_string());

    let cookie = Cookie::build((FLASH_COOKIE, encode_messages(&messages)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Remove and return every queued message
pub fn take(jar: CookieJar) -> (CookieJar, Vec<String>) {
    match jar.get(FLASH_COOKIE).map(|c| decode_messages(c.value())) {
        Some(messages) => (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages),
        None => (jar, Vec::new()),
    }
}
