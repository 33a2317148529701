//! HMAC-signed access tokens: issue, verify, and a boolean validity guard.
//!
//! - The signing key is decoded once at startup and shared read-only.
//! - Every verification failure is reported as `TokenError::Invalid`. The inner
//!   `InvalidToken` kind exists for logs only; callers must treat all kinds alike.
//! - Expiry is checked here against an explicit `now` (not inside jsonwebtoken),
//!   so issuance and verification are pure functions of their inputs.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIN_KEY_BITS: usize = 256;

/// Why a token was rejected (log detail only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidToken {
    #[error("malformed")]
    Malformed,
    #[error("signature mismatch")]
    BadSignature,
    #[error("expired")]
    Expired,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token ({0})")]
    Invalid(InvalidToken),
    #[error("failed to sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("signing key must be at least 256 bits, got {bits}")]
    WeakKey { bits: usize },
    #[error("signing key is not valid base64")]
    KeyEncoding,
    #[error("token expiry is out of the representable time range")]
    ExpiryOutOfRange,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        let kind = match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => InvalidToken::BadSignature,
            ErrorKind::ExpiredSignature => InvalidToken::Expired,
            _ => InvalidToken::Malformed,
        };
        TokenError::Invalid(kind)
    }
}

/// Registered claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Stringified user id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Symmetric key material plus the HMAC variant it selects.
///
/// - Key bytes are intentionally not printable via Debug.
#[derive(Clone)]
pub struct SigningKey {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Decode a base64 secret. The HMAC strength follows the key length:
    /// 512+ bits → HS512, 384+ → HS384, 256+ → HS256; shorter keys are refused.
    pub fn from_base64(secret: &str) -> Result<Self, TokenError> {
        let bytes = STANDARD
            .decode(secret.trim())
            .map_err(|_| TokenError::KeyEncoding)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenError> {
        let bits = bytes.len() * 8;
        let algorithm = match bits {
            b if b >= 512 => Algorithm::HS512,
            b if b >= 384 => Algorithm::HS384,
            b if b >= MIN_KEY_BITS => Algorithm::HS256,
            _ => return Err(TokenError::WeakKey { bits }),
        };

        Ok(Self {
            algorithm,
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

/// Issues and verifies access tokens for a fixed validity window.
#[derive(Clone, Debug)]
pub struct JwtCodec {
    key: SigningKey,
    validity: TimeDelta,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(key: SigningKey, validity: TimeDelta) -> Self {
        let mut validation = Validation::new(key.algorithm());
        // exp is checked against our own clock in `claims_at`
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            key,
            validity,
            validation,
        }
    }

    pub fn validity(&self) -> TimeDelta {
        self.validity
    }

    pub fn create_token(&self, user_id: i64) -> Result<String, TokenError> {
        self.create_token_at(user_id, Utc::now())
    }

    pub fn create_token_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<String, TokenError> {
        let expires_at = now
            .checked_add_signed(self.validity)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let mut header = Header::new(self.key.algorithm);
        header.typ = Some("JWT".to_string());

        jsonwebtoken::encode(&header, &claims, &self.key.encoding).map_err(TokenError::Sign)
    }

    /// Verify signature, structure and expiry, then return the claims.
    pub fn claims(&self, token: &str) -> Result<Claims, TokenError> {
        self.claims_at(token, Utc::now())
    }

    pub fn claims_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.key.decoding, &self.validation)?;
        let claims = data.claims;

        // Valid up to and including exp; one millisecond later it is expired.
        if now.timestamp_millis() > claims.exp.saturating_mul(1000) {
            return Err(TokenError::Invalid(InvalidToken::Expired));
        }

        Ok(claims)
    }

    /// Boolean guard over `claims`; never propagates an error.
    pub fn is_valid(&self, token: &str) -> bool {
        self.is_valid_at(token, Utc::now())
    }

    pub fn is_valid_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.claims_at(token, now) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "access token rejected");
                false
            }
        }
    }
}
