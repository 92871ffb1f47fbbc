use crate::storage::{
    load_string_from_storage, save_string_to_storage, AFFILIATE_KEY, TOKEN_KEY,
};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:6689";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    /// Reads `window.ENV.API_URL`, then `window.ENV.api_url`.
    pub fn new() -> Self {
        let mut upper = None;
        let mut lower = None;

        if let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) {
            if !env.is_undefined() && env.is_object() {
                upper = js_sys::Reflect::get(&env, &"API_URL".into())
                    .ok()
                    .and_then(|v| v.as_string());
                lower = js_sys::Reflect::get(&env, &"api_url".into())
                    .ok()
                    .and_then(|v| v.as_string());
            }
        }

        Self::resolve(upper, lower)
    }

    /// First non-blank candidate wins; trailing slashes are dropped so paths
    /// can be appended as-is.
    pub fn resolve(api_url: Option<String>, legacy_api_url: Option<String>) -> Self {
        let api_url = [api_url, legacy_api_url]
            .into_iter()
            .flatten()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .find(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self { api_url }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the page needs to talk to the backend for one affiliate.
///
/// Built once at startup; the affiliate id and token are persisted so a
/// reload picks up where the admin left off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SessionConfig {
    pub api_url: String,
    pub affiliate_id: Option<String>,
    pub token: Option<String>,
}

impl SessionConfig {
    pub fn new(api_url: String, affiliate_id: Option<String>, token: Option<String>) -> Self {
        Self {
            api_url,
            affiliate_id: normalize_id(affiliate_id.as_deref()),
            token: normalize_id(token.as_deref()),
        }
    }

    pub fn init() -> Self {
        let session = Self::new(
            EnvConfig::new().api_url,
            load_string_from_storage(AFFILIATE_KEY),
            load_string_from_storage(TOKEN_KEY),
        );
        crate::info_log!(
            "session: api_url={} affiliate={:?}",
            session.api_url,
            session.affiliate_id
        );
        session
    }

    /// Changes the affiliate and writes it through to storage.
    pub fn set_affiliate(&mut self, affiliate_id: &str) {
        self.affiliate_id = normalize_id(Some(affiliate_id));
        save_string_to_storage(AFFILIATE_KEY, self.affiliate_id.as_deref());
    }

    pub fn set_token(&mut self, token: &str) {
        self.token = normalize_id(Some(token));
        save_string_to_storage(TOKEN_KEY, self.token.as_deref());
    }
}

fn normalize_id(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Clone, Copy)]
pub(crate) struct SessionContext(pub RwSignal<SessionConfig>);

impl SessionContext {
    pub fn provide() -> Self {
        let ctx = Self(RwSignal::new(SessionConfig::init()));
        provide_context(ctx);
        ctx
    }
}
