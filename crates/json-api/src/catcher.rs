//! JSON error envelopes.
//!
//! Every error response is rendered as JSON whatever the client's `Accept`
//! header says, so browser clients and scripts see the same shape.

use salvo::{http::ResBody, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    /// HTTP status code
    pub code: u16,

    /// Canonical reason phrase for the status
    pub name: String,

    /// Client-facing reason; falls back to the reason phrase
    pub message: String,
}

/// Catcher hoop that replaces the error body with an [`ErrorEnvelope`].
#[handler]
pub(crate) async fn json_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let code = res.status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if !code.is_client_error() && !code.is_server_error() {
        return;
    }

    let name = code.canonical_reason().unwrap_or("Error").to_owned();

    let message = match &res.body {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief.clone(),
        _ => name.clone(),
    };

    res.render(Json(ErrorEnvelope {
        error: ErrorBody {
            code: code.as_u16(),
            name,
            message,
        },
    }));

    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use salvo::{
        catcher::Catcher,
        http::header::{ACCEPT, CONTENT_TYPE},
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn missing() -> Result<&'static str, StatusError> {
        Err(StatusError::not_found().brief("Product not found"))
    }

    #[handler]
    async fn bare() -> Result<&'static str, StatusError> {
        Err(StatusError::internal_server_error())
    }

    fn make_service() -> Service {
        let router = Router::new()
            .push(Router::with_path("missing").get(missing))
            .push(Router::with_path("bare").get(bare));

        Service::new(router).catcher(Catcher::default().hoop(json_errors))
    }

    #[tokio::test]
    async fn test_brief_becomes_message() -> TestResult {
        let mut res = TestClient::get("http://example.com/missing")
            .add_header(ACCEPT, "text/html", true)
            .send(&make_service())
            .await;

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(
            content_type.is_some_and(|value| value.starts_with("application/json")),
            "errors render as JSON even for HTML clients"
        );
        assert_eq!(body.error.code, 404);
        assert_eq!(body.error.message, "Product not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_and_name() -> TestResult {
        let mut res = TestClient::get("http://example.com/bare")
            .send(&make_service())
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error.code, 500);
        assert_eq!(body.error.name, "Internal Server Error");
        assert!(!body.error.message.is_empty(), "message is always present");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_is_json() -> TestResult {
        let mut res = TestClient::get("http://example.com/nowhere")
            .send(&make_service())
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error.name, "Not Found");

        Ok(())
    }
}
