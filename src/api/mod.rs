use crate::config::SessionConfig;
use crate::models::{MenuDocument, MenuItem};
use serde::Serialize;

const MENUS_PATH: &str = "/api/admin/menus";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized: check the access token".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Body of the wholesale menu save.
#[derive(Serialize, Clone, Debug)]
pub(crate) struct SaveMenuRequest<'a> {
    pub affiliate_id: Option<&'a str>,
    pub items: &'a [MenuItem],
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
    pub(crate) affiliate_id: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
            affiliate_id: None,
        }
    }

    pub fn from_session(session: &SessionConfig) -> Self {
        Self {
            token: session.token.clone(),
            affiliate_id: session.affiliate_id.clone(),
            ..Self::new(session.api_url.clone())
        }
    }

    pub(crate) fn get_auth_token(&self) -> Option<String> {
        self.token.clone()
    }

    /// `GET` url for the current affiliate; no query when none is selected.
    pub(crate) fn menu_url(&self) -> String {
        match self.affiliate_id.as_deref() {
            Some(id) => format!(
                "{}{}?affiliate_id={}",
                self.base_url,
                MENUS_PATH,
                urlencoding::encode(id)
            ),
            None => format!("{}{}", self.base_url, MENUS_PATH),
        }
    }

    pub(crate) fn save_request<'a>(&'a self, items: &'a [MenuItem]) -> SaveMenuRequest<'a> {
        SaveMenuRequest {
            affiliate_id: self.affiliate_id.as_deref(),
            items,
        }
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn send_for_menu(
        &self,
        req: reqwest::RequestBuilder,
        ctx: &str,
    ) -> ApiResult<Vec<MenuItem>> {
        let req = Self::with_auth_headers(req, self.get_auth_token());
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            let doc: MenuDocument = res.json().await.map_err(ApiError::parse)?;
            Ok(doc.items)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    pub async fn get_menu(&self) -> ApiResult<Vec<MenuItem>> {
        let req = reqwest::Client::new().get(self.menu_url());
        self.send_for_menu(req, "Loading the menu failed").await
    }

    /// Replaces the stored menu; the response carries server-issued ids.
    pub async fn save_menu(&self, items: &[MenuItem]) -> ApiResult<Vec<MenuItem>> {
        let url = format!("{}{}", self.base_url, MENUS_PATH);
        let req = reqwest::Client::new()
            .post(url)
            .json(&self.save_request(items));
        self.send_for_menu(req, "Saving the menu failed").await
    }
}
