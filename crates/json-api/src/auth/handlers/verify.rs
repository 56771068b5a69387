//! Verify Handler

use salvo::prelude::*;

use crate::{auth::VerifyResponse, extensions::*};

/// Verify Handler
///
/// Echoes the identity the bearer token resolved to.
#[endpoint(
    tags("auth"),
    summary = "Verify Token",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Token is valid"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing, invalid or expired token"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VerifyResponse>, StatusError> {
    let identity = depot.identity_or_401()?;

    Ok(Json(VerifyResponse {
        valid: true,
        user: identity.user.into(),
        is_admin: identity.is_admin,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_ADMIN_UUID, inject_admin};

    use super::*;

    #[tokio::test]
    async fn test_verify_echoes_identity() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject_admin)
                .push(Router::with_path("auth/verify").get(handler)),
        );

        let mut res = TestClient::get("http://example.com/auth/verify")
            .send(&service)
            .await;

        let body: VerifyResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.valid);
        assert!(body.is_admin);
        assert_eq!(body.user, TEST_ADMIN_UUID.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_without_identity_returns_401() -> TestResult {
        let service = Service::new(Router::with_path("auth/verify").get(handler));

        let res = TestClient::get("http://example.com/auth/verify")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
