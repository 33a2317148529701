/// Factory: build the token codec from application `Config`.
use std::sync::Arc;

use chrono::{TimeDelta, Utc};

use crate::config::{Config, ConfigError};
use crate::services::auth::token::{JwtCodec, SigningKey};

pub fn build_jwt_codec(config: &Config) -> Result<Arc<JwtCodec>, ConfigError> {
    let key = SigningKey::from_base64(&config.jwt_secret_key).map_err(|e| {
        tracing::error!(error = %e, "unusable JWT signing key");
        ConfigError::Invalid("JWT_SECRET_KEY")
    })?;

    let validity = i64::try_from(config.jwt_expiration_ms)
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        // tokens issued now must have a representable exp
        .filter(|validity| Utc::now().checked_add_signed(*validity).is_some())
        .ok_or(ConfigError::Invalid("JWT_EXPIRATION_MS"))?;

    tracing::info!(algorithm = ?key.algorithm(), validity_ms = config.jwt_expiration_ms, "jwt codec ready");

    Ok(Arc::new(JwtCodec::new(key, validity)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=";

    fn config_with(secret: &str, expiration_ms: &str) -> Config {
        Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/app".into()),
            "JWT_SECRET_KEY" => Some(secret.into()),
            "JWT_EXPIRATION_MS" => Some(expiration_ms.into()),
            _ => None,
        })
        .unwrap()
    }

    fn config(secret: &str) -> Config {
        config_with(secret, "90000")
    }

    #[test]
    fn builds_codec_from_config() {
        // 32 bytes of 0x01
        let codec = build_jwt_codec(&config(SECRET)).unwrap();
        assert_eq!(codec.validity(), TimeDelta::milliseconds(90_000));

        let token = codec.create_token(7).unwrap();
        assert_eq!(codec.claims(&token).unwrap().sub, "7");
    }

    #[test]
    fn short_secret_is_rejected_as_invalid_config() {
        // "short"
        let err = build_jwt_codec(&config("c2hvcnQ=")).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("JWT_SECRET_KEY"));
    }

    #[test]
    fn validity_past_the_clock_range_is_rejected_at_startup() {
        let err = build_jwt_codec(&config_with(SECRET, "9000000000000000")).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("JWT_EXPIRATION_MS"));

        // ten years still issues tokens
        let codec = build_jwt_codec(&config_with(SECRET, "315360000000")).unwrap();
        assert!(codec.create_token(1).is_ok());
    }
}
