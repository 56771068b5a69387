//! Admin authorization hoop.
//!
//! Runs after [`super::middleware::handler`]. The identity it checks was built from
//! the stored account on this request, so a revoked admin flag takes effect at once.

use salvo::prelude::*;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.identity_or_401() {
        Ok(identity) if identity.is_admin => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(_) => {
            res.render(StatusError::forbidden().brief("Admin access required"));
            ctrl.skip_rest();
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{inject_admin, inject_user};

    use super::*;

    #[salvo::handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn route() -> Router {
        Router::new().hoop(handler).get(ok)
    }

    #[tokio::test]
    async fn test_admin_passes() -> TestResult {
        let service = Service::new(Router::new().hoop(inject_admin).push(route()));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_regular_user_is_forbidden() -> TestResult {
        let service = Service::new(Router::new().hoop(inject_user).push(route()));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_caller_is_unauthorized() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&Service::new(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
