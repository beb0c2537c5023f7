//! Typed fetch wrappers for the gateway API.

use alert_core::catalog::{AlertSource, ProviderCatalog};
use alert_core::submit::PushError;
use alert_core::types::AlertRecord;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Where and how to reach the gateway. Handed to components explicitly;
/// there is no ambient session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiContext {
    pub base_url: String,
    pub access_token: String,
}

impl ApiContext {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

pub async fn fetch_providers(api: &ApiContext) -> Result<Vec<AlertSource>, String> {
    let catalog: ProviderCatalog = get_json(api, "/providers").await?;
    Ok(catalog.alert_sources())
}

#[derive(Deserialize)]
struct AlertListing {
    data: Vec<AlertRecord>,
}

pub async fn fetch_alerts(api: &ApiContext, preset: &str) -> Result<Vec<AlertRecord>, String> {
    let listing: AlertListing = get_json(api, &format!("/alerts?preset={preset}")).await?;
    Ok(listing.data)
}

/// One push attempt: the body goes out as-is, non-ok responses surface
/// the server's `detail` when it sends one.
pub async fn push_alert(
    api: &ApiContext,
    source_type: &str,
    preset: &str,
    body: &str,
) -> Result<(), PushError> {
    let path = format!("/alerts/event/{source_type}?preset={preset}");
    let response = send(api, "POST", &path, Some(body))
        .await
        .map_err(PushError::Transport)?;

    if response.ok() {
        return Ok(());
    }
    let detail = read_detail(&response).await;
    Err(PushError::Rejected { detail })
}

#[derive(Deserialize)]
struct ErrorDetail {
    detail: Option<String>,
}

async fn read_detail(response: &Response) -> Option<String> {
    let promise = response.json().ok()?;
    let value = JsFuture::from(promise).await.ok()?;
    let parsed: ErrorDetail = serde_wasm_bindgen::from_value(value).ok()?;
    parsed.detail
}

async fn get_json<T: DeserializeOwned>(api: &ApiContext, path: &str) -> Result<T, String> {
    let response = send(api, "GET", path, None).await?;
    if !response.ok() {
        return Err(format!("request failed with status {}", response.status()));
    }
    let promise = response
        .json()
        .map_err(|_| "response is not JSON".to_string())?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| format!("failed to read response: {e:?}"))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())
}

async fn send(
    api: &ApiContext,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> Result<Response, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&api.url(path), &opts)
        .map_err(|e| format!("failed to build request: {e:?}"))?;
    let headers = request.headers();
    if body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| format!("failed to set headers: {e:?}"))?;
    }
    headers
        .set("Authorization", &format!("Bearer {}", api.access_token))
        .map_err(|e| format!("failed to set headers: {e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch failed: {e:?}"))?;
    response
        .dyn_into::<Response>()
        .map_err(|_| "fetch returned a non-response".to_string())
}
