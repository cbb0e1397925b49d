//! HTTP gateway for page actions, editor lookups and form saves.
//!
//! # Design
//! - Every mutation is a form-encoded POST carrying the CSRF and XHR headers.
//! - Acknowledgement bodies are read even on error statuses; the server explains failures there.

use async_trait::async_trait;
use devmitra_api_models::{
    ActionAck, ActionRoute, CategoryReply, EntityAction, EntityKind, FORM_CONTENT_TYPE,
    FormSaveResponse, HEADER_CSRF, HEADER_REQUESTED_WITH, NOTIFICATION_SAVE_PATH,
    NotificationReply, REQUESTED_WITH_XHR, category_lookup_route, category_save_path,
    mark_all_read_route, notification_lookup_path, route_action,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::FormData;

use crate::core::actions::{EntityGateway, GatewayError};
use crate::core::config::UiConfig;
use crate::core::csrf::CsrfToken;
use crate::core::list::CardId;

/// Gateway posting to the dashboard server from the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HttpGateway {
    config: UiConfig,
    csrf: Option<CsrfToken>,
}

impl HttpGateway {
    pub(crate) const fn new(config: UiConfig, csrf: Option<CsrfToken>) -> Self {
        Self { config, csrf }
    }

    fn request(&self, url: &str) -> Request {
        let mut req = Request::post(url)
            .header(HEADER_REQUESTED_WITH, REQUESTED_WITH_XHR);
        if let Some(token) = &self.csrf {
            req = req.header(HEADER_CSRF, token.as_str());
        }
        req
    }

    pub(crate) async fn post_route(&self, route: &ActionRoute) -> Result<ActionAck, GatewayError> {
        self.post_encoded(route).await
    }

    async fn post_encoded<T: DeserializeOwned>(&self, route: &ActionRoute) -> Result<T, GatewayError> {
        let response = self
            .request(&self.config.url(&route.path))
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(route.encode_form())
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        read_body(&response).await
    }

    pub(crate) async fn mark_all_read(&self) -> Result<ActionAck, GatewayError> {
        self.post_route(&mark_all_read_route()).await
    }

    /// Submit a whole `<form>` (multipart) to `action`.
    pub(crate) async fn submit_form<T: DeserializeOwned>(
        &self,
        action: &str,
        form: FormData,
    ) -> Result<T, GatewayError> {
        let response = self
            .request(action)
            .body(form)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        read_body(&response).await
    }

    pub(crate) async fn fetch_category(&self, id: &str) -> Result<CategoryReply, GatewayError> {
        self.post_encoded(&category_lookup_route(id)?).await
    }

    pub(crate) async fn save_category(&self, form: FormData) -> Result<CategoryReply, GatewayError> {
        self.submit_form(&self.config.url(&category_save_path()), form)
            .await
    }

    pub(crate) async fn fetch_notification(&self, id: &str) -> Result<NotificationReply, GatewayError> {
        let url = self.config.url(&notification_lookup_path(id)?);
        let response = Request::get(&url)
            .header(HEADER_REQUESTED_WITH, REQUESTED_WITH_XHR)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        read_body(&response).await
    }

    pub(crate) async fn save_notification(
        &self,
        form: FormData,
    ) -> Result<FormSaveResponse, GatewayError> {
        self.submit_form(&self.config.url(NOTIFICATION_SAVE_PATH), form)
            .await
    }
}

async fn read_body<T: DeserializeOwned>(response: &Response) -> Result<T, GatewayError> {
    let ok = response.ok();
    let status = response.status();
    match response.json::<T>().await {
        Ok(body) => Ok(body),
        Err(_) if !ok => Err(GatewayError::Status { status }),
        Err(err) => Err(GatewayError::Decode(err.to_string())),
    }
}

#[async_trait(?Send)]
impl EntityGateway for HttpGateway {
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
