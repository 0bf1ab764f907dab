//! Request body validation
//!
//! Bodies are read leniently: anything that is not a JSON object (including
//! unparseable input) becomes `{}` so that required-field checks report the
//! problem instead of a parse error.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Display;

use crate::error::{ApiError, ApiResult};

/// Returns the first field of `required` that is absent or `null` in `body`.
///
/// Empty strings and zero are present values.
pub fn first_missing<'a>(body: &Value, required: &[&'a str]) -> Option<&'a str> {
    required
        .iter()
        .copied()
        .find(|field| body.get(field).map_or(true, Value::is_null))
}

/// Fails with `<field> is required` for the first missing field.
pub fn require(body: &Value, required: &[&str]) -> ApiResult<()> {
    match first_missing(body, required) {
        Some(field) => Err(ApiError::missing(field)),
        None => Ok(()),
    }
}

/// Like [`require`] but also rejects empty or whitespace-only strings.
pub fn require_text(body: &Value, field: &str) -> ApiResult<String> {
    match body.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(ApiError::missing(field)),
        Some(_) => Err(ApiError::invalid(format!("{field} must be a string"))),
    }
}

/// Inclusive range check for numeric fields.
pub fn check_range<T>(field: &str, value: T, min: T, max: T) -> ApiResult<()>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ApiError::invalid(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}

/// Lower-bound check for numeric fields.
pub fn check_min<T>(field: &str, value: T, min: T) -> ApiResult<()>
where
    T: PartialOrd + Display,
{
    if value < min {
        return Err(ApiError::invalid(format!("{field} must be at least {min}")));
    }
    Ok(())
}

/// JSON body extractor that never rejects on malformed input.
#[derive(Debug, Clone)]
pub struct LenientJson(pub Value);

impl LenientJson {
    /// Parse raw bytes; non-object or invalid JSON yields `{}`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let value = serde_json::from_slice::<Value>(bytes)
            .ok()
            .filter(Value::is_object)
            .unwrap_or_else(|| Value::Object(Map::new()));
        Self(value)
    }

    /// Check required fields, then deserialize into the typed payload.
    pub fn parse<T: DeserializeOwned>(self, required: &[&str]) -> ApiResult<T> {
        require(&self.0, required)?;
        Ok(serde_json::from_value(self.0)?)
    }

    /// Borrow the raw body
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// The `keys` the client sent as an explicit `null`.
    ///
    /// Typed optional fields read `null` as `None`; merging this map into a
    /// record's flattened extras keeps the key in the echoed body.
    pub fn explicit_nulls(&self, keys: &[&str]) -> Map<String, Value> {
        keys.iter()
            .filter(|key| self.0.get(**key).is_some_and(Value::is_null))
            .map(|key| ((*key).to_string(), Value::Null))
            .collect()
    }
}

#[async_trait]
impl<S> FromRequest<S> for LenientJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid(e.body_text()))?;
        Ok(Self::from_bytes(&bytes))
    }
}

/// Remove keys the server assigns so a client cannot shadow them.
pub fn strip_reserved(extra: &mut Map<String, Value>, reserved: &[&str]) {
    for key in reserved {
        extra.remove(*key);
    }
}
