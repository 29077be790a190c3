use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{Identity, Role, UserId};
use crate::config::AuthConfig;

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn identity(self) -> Identity {
        Identity {
            user_id: UserId(self.sub),
            role: self.role,
            name: self.name,
            email: self.email,
        }
    }
}

/// Signs and verifies HS256 bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for JwtAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthority")
            .field("validation", &self.validation)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtAuthority {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, TokenError> {
        let ttl = Duration::try_hours(config.token_ttl_hours)
            .ok_or(TokenError::Lifetime(config.token_ttl_hours))?;
        Ok(Self::new(&config.jwt_secret, ttl))
    }

    /// Sign a token describing `identity`, valid for the configured lifetime.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::Lifetime(self.ttl.num_hours()))?;
        let claims = Claims {
            sub: identity.user_id.0.clone(),
            role: identity.role,
            name: identity.name.clone(),
            email: identity.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)
    }

    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(err.to_string()),
            },
        )?;

        Ok(data.claims.identity())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token rejected: {0}")]
    Invalid(String),
    #[error("token lifetime of {0} hours is out of range")]
    Lifetime(i64),
    #[error("unable to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}
