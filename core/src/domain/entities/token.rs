//! Token entities for the compact signed token format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TokenError;

/// Algorithm identifier for RSA signatures with SHA-256
pub const ALGORITHM_RS256: &str = "RS256";

/// Type tag written to every token header
pub const TOKEN_TYPE: &str = "JWT";

/// Claims populated by the issuer; callers may not supply these
pub const RESERVED_CLAIMS: [&str; 5] = ["iss", "jti", "iat", "nbf", "exp"];

/// Longest accepted token lifetime (365 days, in seconds)
pub const MAX_LIFETIME: i64 = 365 * 24 * 60 * 60;

/// `true` when `lifetime` is within `1..=MAX_LIFETIME`
pub fn is_valid_lifetime(lifetime: i64) -> bool {
    (1..=MAX_LIFETIME).contains(&lifetime)
}

/// First segment of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Signing algorithm identifier
    pub alg: String,

    /// Token type tag
    pub typ: String,
}

impl Header {
    /// Creates a header for the given algorithm
    pub fn new(alg: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// Caller-supplied private claims.
///
/// Backed by a `BTreeMap` so claims always serialize in sorted key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(BTreeMap<String, Value>);

impl Claims {
    /// Creates an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a claim, consuming and returning the set
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a claim, returning the previous value under that name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Looks up a claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates claims in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Builds a claim set from any value that serializes to a JSON object
    ///
    /// # Errors
    ///
    /// * `TokenError::EncodingError` - serialization failed or the value is
    ///   not a JSON object
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, TokenError> {
        let value = serde_json::to_value(value).map_err(|e| TokenError::EncodingError {
            message: e.to_string(),
        })?;

        match value {
            Value::Object(map) => Ok(Self(map.into_iter().collect())),
            other => Err(TokenError::EncodingError {
                message: format!("claims must be a JSON object, got {}", json_kind(&other)),
            }),
        }
    }

    /// Returns the first claim name that collides with a reserved claim
    pub fn reserved_collision(&self) -> Option<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .find(|name| RESERVED_CLAIMS.contains(name))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Second segment of a token: registered claims followed by private claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Issuer
    pub iss: String,

    /// Token ID, unique per issuance
    pub jti: String,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Not before (Unix seconds), always equal to `iat` for issued tokens
    pub nbf: i64,

    /// Expiration (Unix seconds)
    pub exp: i64,

    /// Caller-defined claims
    #[serde(flatten)]
    pub claims: Claims,
}

impl Payload {
    /// Assembles the payload for a token issued at `issued_at`.
    ///
    /// Fails with `ExpiryOverflow` when `issued_at + lifetime` does not fit
    /// in an `i64`.
    pub fn new(
        issuer: impl Into<String>,
        jti: impl Into<String>,
        issued_at: i64,
        lifetime: i64,
        claims: Claims,
    ) -> Result<Self, TokenError> {
        let exp = issued_at
            .checked_add(lifetime)
            .ok_or(TokenError::ExpiryOverflow {
                issued_at,
                lifetime,
            })?;

        Ok(Self {
            iss: issuer.into(),
            jti: jti.into(),
            iat: issued_at,
            nbf: issued_at,
            exp,
            claims,
        })
    }

    /// Looks up any claim, registered or private, by name
    pub fn claim(&self, name: &str) -> Option<Value> {
        match name {
            "iss" => Some(Value::from(self.iss.as_str())),
            "jti" => Some(Value::from(self.jti.as_str())),
            "iat" => Some(Value::from(self.iat)),
            "nbf" => Some(Value::from(self.nbf)),
            "exp" => Some(Value::from(self.exp)),
            _ => self.claims.get(name).cloned(),
        }
    }

    /// `true` once `now` has reached `exp`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// `true` while `now` is before `nbf`
    pub fn is_premature_at(&self, now: i64) -> bool {
        now < self.nbf
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
