//! # Session
//!
//! Client-side session stored in a single cookie, signed with the server secret.
//!
//! ## Cookie Format
//! - `session=<payload>.<signature>`
//! - payload: URL-safe base64 (no padding) of the JSON session
//! - signature: hex HMAC-SHA256 of the payload under `SESSION_SECRET`
//!
//! The client can read its cart but cannot change it without invalidating the signature.
//! A bad or missing cookie simply starts a fresh session.
use std::mem;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::{IntoResponseParts, ResponseParts},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use catalog::{Cart, add_to_cart};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, warn};

use crate::error::{AppError, ConfigError};

pub const SESSION_COOKIE: &str = "session";

/// Browsers drop cookies larger than about 4 KB without telling the server.
pub const COOKIE_SIZE_LIMIT: usize = 4096;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct SessionData {
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub flashes: Vec<String>,
}

#[derive(Clone)]
pub struct SessionKey {
    mac: Hmac<Sha256>,
}

impl SessionKey {
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        let mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|e| {
            ConfigError::Invalid {
                key: "SESSION_SECRET",
                reason: e.to_string(),
            }
        })?;

        Ok(Self { mac })
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }

    fn verify(&self, payload: &str, signature: &str) -> bool {
        let Ok(signature) = hex::decode(signature) else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());

        mac.verify_slice(&signature).is_ok()
    }

    pub fn encode(&self, data: &SessionData) -> Result<String, serde_json::Error> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(data)?);
        let signature = self.sign(&payload);

        Ok(format!("{payload}.{signature}"))
    }

    /// `None` for anything not produced by `encode` under this key.
    pub fn decode(&self, value: &str) -> Option<SessionData> {
        let (payload, signature) = value.rsplit_once('.')?;

        if !self.verify(payload, signature) {
            warn!("Session cookie failed signature check, starting a fresh session");
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;

        serde_json::from_slice(&json)
            .map_err(|e| warn!("Signed session did not parse: {e}"))
            .ok()
    }
}

pub struct Session {
    data: SessionData,
    key: SessionKey,
    dirty: bool,
}

impl Session {
    pub fn new(data: SessionData, key: SessionKey) -> Self {
        Self {
            data,
            key,
            dirty: false,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.data.cart
    }

    pub fn add_to_cart(&mut self, melon_id: &str) {
        let cart = mem::take(&mut self.data.cart);
        self.data.cart = add_to_cart(cart, melon_id);
        self.dirty = true;
    }

    pub fn flash(&mut self, message: impl Into<String>) {
        self.data.flashes.push(message.into());
        self.dirty = true;
    }

    /// Drains queued flash messages so each one is shown once.
    pub fn take_flashes(&mut self) -> Vec<String> {
        if !self.data.flashes.is_empty() {
            self.dirty = true;
        }

        mem::take(&mut self.data.flashes)
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

fn exceeds_cookie_limit(cookie: &str) -> bool {
    cookie.len() > COOKIE_SIZE_LIMIT
}

impl<S> FromRequestParts<S> for Session
where
    SessionKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let key = SessionKey::from_ref(state);

        let data = session_cookie(&parts.headers)
            .and_then(|value| key.decode(value))
            .unwrap_or_else(|| {
                debug!("No usable session cookie, starting a fresh session");
                SessionData::default()
            });

        Ok(Session::new(data, key))
    }
}

impl IntoResponseParts for Session {
    type Error = AppError;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.dirty {
            return Ok(res);
        }

        let value = self
            .key
            .encode(&self.data)
            .map_err(|e| AppError::Session(e.to_string()))?;
        let cookie = format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax");
        if exceeds_cookie_limit(&cookie) {
            warn!(
                bytes = cookie.len(),
                limit = COOKIE_SIZE_LIMIT,
                "Session cookie exceeds browser limit and may be dropped"
            );
        }
        let header = HeaderValue::from_str(&cookie).map_err(|e| AppError::Session(e.to_string()))?;

        res.headers_mut().append(SET_COOKIE, header);

        Ok(res)
    }
}
