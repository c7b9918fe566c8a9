use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String, // user id
    pub name: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn now_unix() -> usize {
    chrono::Utc::now().timestamp().max(0) as usize
}

pub fn make_session_claims(user_id: &Uuid, name: &str, ttl_secs: usize) -> SessionClaims {
    let iat = now_unix();
    SessionClaims {
        sub: user_id.to_string(),
        name: name.to_string(),
        iat,
        exp: iat.saturating_add(ttl_secs),
    }
}

pub fn encode_token(keys: &JwtKeys, claims: &SessionClaims) -> Result<String, AppError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());

    encode(&header, claims, &keys.enc)
        .map_err(|err| AppError::internal(format!("Session token encoding failed: {err}")))
}

/// Signature and expiry are both checked; any failure yields `None`.
pub fn decode_token(keys: &JwtKeys, token: &str) -> Option<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    match decode::<SessionClaims>(token, &keys.dec, &validation) {
        Ok(data) => Some(data.claims),
        Err(err) => {
            tracing::debug!(error = %err, "rejected session token");
            None
        }
    }
}
