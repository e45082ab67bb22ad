//! Admin API key handling and token signing
//!
//! An admin key looks like `id:secret`, where the secret is hex encoded. Requests
//! are authenticated with a short-lived HS256 JWT whose `kid` header carries the
//! key id and whose audience names the admin API version.

use crate::error::{PublishError, Result};
use crate::ghost::API_VERSION;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// How long a signed token stays valid
pub const TOKEN_LIFETIME_MINUTES: i64 = 5;

/// A parsed admin API key
#[derive(Clone, PartialEq, Eq)]
pub struct AdminKey {
    id: String,
    secret: Vec<u8>,
}

impl AdminKey {
    /// Parse an `id:secret_hex` key
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (id, secret) = raw
            .split_once(':')
            .ok_or_else(|| PublishError::invalid_admin_key("expected `id:secret`, found no colon"))?;

        if secret.contains(':') {
            return Err(PublishError::invalid_admin_key(
                "expected exactly one colon separator",
            ));
        }
        if id.is_empty() {
            return Err(PublishError::invalid_admin_key("key id is empty"));
        }

        let secret = hex::decode(secret)
            .map_err(|e| PublishError::invalid_admin_key(format!("secret is not hex: {}", e)))?;

        Ok(Self {
            id: id.to_string(),
            secret,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

// Keep the secret out of logs
impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminKey")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
    pub kid: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iat: i64,
    pub exp: i64,
    pub aud: String,
}

/// A signed admin API token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminToken {
    value: String,
    expires_at: i64,
}

impl AdminToken {
    /// Audience claim expected by the admin API
    pub fn audience() -> String {
        format!("/{}/admin/", API_VERSION)
    }

    /// Sign a token valid from now
    pub fn sign(key: &AdminKey) -> Result<Self> {
        Self::sign_at(key, Utc::now())
    }

    /// Sign a token issued at a given instant
    pub fn sign_at(key: &AdminKey, issued_at: DateTime<Utc>) -> Result<Self> {
        let header = TokenHeader {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
            kid: key.id.clone(),
        };
        let iat = issued_at.timestamp();
        let exp = (issued_at + Duration::minutes(TOKEN_LIFETIME_MINUTES)).timestamp();
        let claims = TokenClaims {
            iat,
            exp,
            aud: Self::audience(),
        };

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
        );

        let mut mac = HmacSha256::new_from_slice(&key.secret)
            .map_err(|e| PublishError::invalid_admin_key(e.to_string()))?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        log::debug!("Signed admin token for key {} (expires at {})", key.id, exp);

        Ok(Self {
            value: format!("{}.{}", signing_input, signature),
            expires_at: exp,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Expiry as a unix timestamp
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Ghost {}", self.value)
    }
}

impl fmt::Display for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
