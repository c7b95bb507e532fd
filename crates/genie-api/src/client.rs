// Genie API HTTP client
//
// Wraps `reqwest::Client` with URL construction, the strict "200 or bust"
// status policy and JSON decoding. Endpoint methods live in `auth.rs` and
// `hubs.rs` as inherent impls to keep this module about transport only.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Content type the cloud expects on every form POST.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Raw HTTP client for the Genie cloud API.
///
/// Stateless: the account hash and hub hash are passed into each call,
/// never held here. No auth header exists; identity travels in the URL
/// path or the form body.
#[derive(Debug, Clone)]
pub struct GenieClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GenieClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API host root (e.g. `https://rituals.sense-company.com`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let body = Self::expect_ok(resp).await?;
        Self::decode(&body)
    }

    /// Send a form-encoded POST and decode the JSON body.
    pub(crate) async fn post_form_json<T: DeserializeOwned>(
        &self,
        url: Url,
        form: &impl Serialize,
    ) -> Result<T, Error> {
        let body = self.post_form(url, form).await?;
        Self::decode(&body)
    }

    /// Send a form-encoded POST, returning the raw body on `200`.
    pub(crate) async fn post_form(&self, url: Url, form: &impl Serialize) -> Result<String, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::expect_ok(resp).await
    }

    /// Accept exactly `200 OK`; anything else becomes `UnexpectedStatus`.
    async fn expect_ok(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "unexpected status");
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        resp.text().await.map_err(Error::Transport)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.to_owned(),
        })
    }
}
