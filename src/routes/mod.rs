//! API Routes

pub mod admin;
pub mod health;
pub mod user;

use crate::error::ApiError;

/// Fallback for unmatched paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
