use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the catalog service and its HTTP surface
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Create a new validation error
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new store error
    pub fn store<T: Into<String>>(msg: T) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Create a new authentication error
    pub fn auth<T: Into<String>>(msg: T) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a new not found error
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new config error
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal<T: Into<String>>(msg: T) -> Self {
        Self::Internal(msg.into())
    }

    /// Get error category for logging and API responses
    pub fn category(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => "validation",
            CatalogError::StoreUnavailable(_) => "store_unavailable",
            CatalogError::Authentication(_) => "auth",
            CatalogError::NotFound(_) => "not_found",
            CatalogError::Config(_) => "config",
            CatalogError::Internal(_) => "internal",
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            CatalogError::Validation(_) => 400,
            CatalogError::Authentication(_) => 401,
            CatalogError::NotFound(_) => 404,
            CatalogError::StoreUnavailable(_) => 503,
            CatalogError::Config(_) => 500,
            CatalogError::Internal(_) => 500,
        }
    }

    /// Convert to JSON for API responses
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.category(),
            "message": self.to_string(),
            "code": self.http_status_code(),
        })
    }
}

impl ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_json())
    }
}

/// Error context trait for adding additional context to errors
pub trait ErrorContext<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    fn context(self, msg: &str) -> Result<T>;
}

impl<T> ErrorContext<T> for Option<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| CatalogError::NotFound(f()))
    }

    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }
}

/// Return early with the given error when the condition does not hold
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_category() {
        assert_eq!(CatalogError::validation("missingUsername").http_status_code(), 400);
        assert_eq!(CatalogError::auth("Invalid credentials").http_status_code(), 401);
        assert_eq!(CatalogError::not_found("x").http_status_code(), 404);
        assert_eq!(CatalogError::store("down").http_status_code(), 503);
        assert_eq!(CatalogError::internal("bug").http_status_code(), 500);
    }

    #[test]
    fn test_to_json_shape() {
        let json = CatalogError::validation("missingUsername").to_json();
        assert_eq!(json["error"], "validation");
        assert_eq!(json["code"], 400);
        assert_eq!(json["message"], "Validation error: missingUsername");
    }

    #[test]
    fn test_option_context_maps_to_not_found() {
        let missing: Option<u8> = None;
        let err = missing.context("Listing not found: abc").unwrap_err();
        assert_eq!(err, CatalogError::NotFound("Listing not found: abc".to_string()));
    }

    #[test]
    fn test_response_error_status() {
        let err = CatalogError::store("pool closed");
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
