//! HTTP gateway, command context, and error types for the CLI.

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use devmitra_api_models::{
    ActionAck, ActionRoute, CSRF_COOKIE, EntityAction, EntityKind, FORM_CONTENT_TYPE, HEADER_CSRF,
    HEADER_REQUESTED_WITH, REQUESTED_WITH_XHR, route_action,
};
use devmitra_ui::core::actions::{EntityGateway, GatewayError};
use devmitra_ui::core::list::CardId;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{Client, Url};

pub(crate) const SESSION_COOKIE: &str = "sessionid";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Application context passed to command handlers.
///
/// Doubles as the [`EntityGateway`] the shared action controller talks to.
#[derive(Clone, Debug)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) csrf_token: Option<String>,
    pub(crate) session_id: Option<String>,
}

impl AppContext {
    /// Absolute URL for a server path, keeping any path prefix on the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
            .parse()
            .map_err(|err| GatewayError::Transport(format!("invalid endpoint '{path}': {err}")))
    }

    fn cookie_header(&self) -> Option<String> {
        let mut pairs = Vec::new();
        if let Some(token) = &self.csrf_token {
            pairs.push(format!("{CSRF_COOKIE}={token}"));
        }
        if let Some(session) = &self.session_id {
            pairs.push(format!("{SESSION_COOKIE}={session}"));
        }
        (!pairs.is_empty()).then(|| pairs.join("; "))
    }

    /// POST a form-encoded route and decode the acknowledgement.
    pub(crate) async fn post_route(&self, route: &ActionRoute) -> Result<ActionAck, GatewayError> {
        let url = self.endpoint(&route.path)?;
        let mut request = self
            .client
            .post(url)
            .header(HEADER_REQUESTED_WITH, REQUESTED_WITH_XHR)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(route.encode_form());
        if let Some(token) = &self.csrf_token {
            request = request.header(HEADER_CSRF, token.as_str());
        }
        if let Some(cookies) = self.cookie_header() {
            request = request.header(COOKIE, cookies);
        }

        tracing::debug!(path = %route.path, "posting action");
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Transport(format!("request to {} failed: {err}", route.path)))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        match serde_json::from_slice::<ActionAck>(&bytes) {
            Ok(ack) => Ok(ack),
            Err(_) if !status.is_success() => Err(GatewayError::Status {
                status: status.as_u16(),
            }),
            Err(err) => Err(GatewayError::Decode(err.to_string())),
        }
    }
}

#[async_trait(?Send)]
impl EntityGateway for AppContext {
    async fn perform(
        &self,
        kind: EntityKind,
        id: &CardId,
        action: EntityAction,
    ) -> Result<ActionAck, GatewayError> {
        let route = route_action(kind, id.as_str(), action)?;
        self.post_route(&route).await
    }
}

/// Parse the dashboard URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Parse an entity kind argument (`projects`, `skill`, `contact-responses`, ...).
pub(crate) fn parse_kind(input: &str) -> Result<EntityKind, String> {
    input.parse::<EntityKind>().map_err(|err| err.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    pub(crate) fn context_with(server: &MockServer, csrf_token: Option<&str>) -> AppContext {
        AppContext {
            client: Client::new(),
            base_url: server.base_url().parse().expect("valid URL"),
            csrf_token: csrf_token.map(str::to_string),
            session_id: None,
        }
    }

    #[test]
    fn exit_codes_split_validation_from_failure() {
        let validation = CliError::validation("bad input");
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(validation.display_message(), "bad input");
        let failure = CliError::failure(anyhow::anyhow!("offline"));
        assert_eq!(failure.exit_code(), 3);
        assert_eq!(failure.display_message(), "offline");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let ctx = AppContext {
            client: Client::new(),
            base_url: "https://admin.example.test/dashboard/".parse().expect("valid URL"),
            csrf_token: None,
            session_id: None,
        };
        let url = ctx.endpoint("/projects/").expect("endpoint");
        assert_eq!(url.as_str(), "https://admin.example.test/dashboard/projects/");
    }

    #[test]
    fn parse_helpers_report_bad_input() {
        assert!(parse_url("not a url").is_err());
        assert_eq!(parse_kind("skills"), Ok(EntityKind::Skill));
        assert!(parse_kind("widgets").is_err());
    }

    #[tokio::test]
    async fn perform_sends_headers_cookies_and_form() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/skills/")
                .header(HEADER_CSRF, "tok-1")
                .header(HEADER_REQUESTED_WITH, REQUESTED_WITH_XHR)
                .header("cookie", "csrftoken=tok-1; sessionid=sess")
                .body("skill_id=4&is_active=false");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"success": true}));
        });

        let mut ctx = context_with(&server, Some("tok-1"));
        ctx.session_id = Some("sess".to_string());
        let ack = ctx
            .perform(
                EntityKind::Skill,
                &CardId::from("4"),
                EntityAction::Toggle { is_active: false },
            )
            .await
            .expect("ack");
        assert!(ack.success);
        mock.assert();
    }

    #[tokio::test]
    async fn error_status_with_ack_body_is_still_decoded() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/projects/9/delete/");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(json!({"success": false, "error": "Project is referenced"}));
        });

        let ctx = context_with(&server, None);
        let ack = ctx
            .perform(EntityKind::Project, &CardId::from("9"), EntityAction::Delete)
            .await
            .expect("ack");
        assert_eq!(ack.reason(), Some("Project is referenced"));
    }

    #[tokio::test]
    async fn error_status_without_body_maps_to_status_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/notifications/mark-read/3/");
            then.status(403).body("forbidden");
        });

        let ctx = context_with(&server, None);
        let err = ctx
            .perform(
                EntityKind::Notification,
                &CardId::from("3"),
                EntityAction::MarkRead,
            )
            .await
            .expect_err("status error expected");
        assert_eq!(err, GatewayError::Status { status: 403 });
    }

    #[tokio::test]
    async fn unsupported_route_never_reaches_the_server() {
        let server = MockServer::start_async().await;
        let ctx = context_with(&server, None);
        let err = ctx
            .perform(
                EntityKind::ContactResponse,
                &CardId::from("1"),
                EntityAction::Delete,
            )
            .await
            .expect_err("route error expected");
        assert!(matches!(err, GatewayError::Route(_)));
    }
}
