use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::models::Principal;
use crate::server::app_state::AppState;
use crate::services::IdentityProvider;

/// Sign-in request body
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Token carried in `Authorization: Bearer <token>`, if any
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// The signed-in administrator, resolved from the bearer token.
///
/// Handlers that take this extractor are admin-only: a missing, unknown or
/// expired token is rejected with 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AdminPrincipal(pub Principal);

impl FromRequest for AdminPrincipal {
    type Error = CatalogError;
    type Future = Pin<Box<dyn Future<Output = Result<Self>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<Arc<AppState>>>().cloned();

        Box::pin(async move {
            let state = state.ok_or_else(|| CatalogError::internal("Application state not configured"))?;
            let token = token.ok_or_else(|| CatalogError::auth("Missing bearer token"))?;

            match state.auth.current_principal(&token).await? {
                Some(principal) => Ok(AdminPrincipal(principal)),
                None => {
                    warn!("Rejected request with an invalid or expired token");
                    Err(CatalogError::auth("Invalid or expired token"))
                }
            }
        })
    }
}

/// POST /auth/sign-in
pub async fn sign_in(
    state: web::Data<Arc<AppState>>,
    body: web::Json<SignInRequest>,
) -> Result<HttpResponse> {
    let session = state.auth.sign_in(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(session))
}

/// POST /auth/sign-out
pub async fn sign_out(state: web::Data<Arc<AppState>>, req: HttpRequest) -> Result<HttpResponse> {
    let token = bearer_token(&req).ok_or_else(|| CatalogError::auth("Missing bearer token"))?;
    state.auth.sign_out(&token).await?;
    debug!("Session ended");
    Ok(HttpResponse::NoContent().finish())
}

/// GET /auth/me
pub async fn me(AdminPrincipal(principal): AdminPrincipal) -> HttpResponse {
    HttpResponse::Ok().json(principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc-123"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc-123".to_string()));

        let basic = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&basic), None);

        let empty = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&empty), None);

        assert_eq!(bearer_token(&TestRequest::default().to_http_request()), None);
    }
}
