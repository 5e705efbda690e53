use std::marker::PhantomData;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct ZendeskClientConfig {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub timeout_secs: u64,
}

impl ZendeskClientConfig {
    /// Load Zendesk config from environment.
    ///
    /// All three credentials are mandatory; the base URL is derived from the
    /// account subdomain.
    pub fn from_env() -> Result<Self, String> {
        let subdomain = require("ZENDESK_SUBDOMAIN")?;
        let email = require("ZENDESK_EMAIL")?;
        let api_token = require("ZENDESK_API_TOKEN")?;
        let timeout_secs = std::env::var("ZENDESK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url: format!("https://{subdomain}.zendesk.com"),
            email,
            api_token,
            timeout_secs,
        })
    }
}

fn require(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("{key} is required but not set"))
}

#[derive(Debug, thiserror::Error)]
pub enum ZendeskClientError {
    #[error("HTTP {status}: {body}")]
    HttpError { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("bad response payload: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("protocol violation: {0}")]
    Protocol(String),
}

#[derive(Clone)]
pub struct ZendeskClient {
    client: Client,
    config: ZendeskClientConfig,
}

impl ZendeskClient {
    pub fn new(config: ZendeskClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// One authenticated GET returning the parsed JSON body.
    ///
    /// HTTP 429 is retried in place after sleeping for the server's
    /// `Retry-After` (60s when absent), with no attempt cap — rate-limit
    /// stalls are expected to self-resolve. Any other non-2xx status fails
    /// immediately with the status and body.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, ZendeskClientError> {
        loop {
            let response = self
                .client
                .get(url)
                .basic_auth(
                    format!("{}/token", self.config.email),
                    Some(&self.config.api_token),
                )
                .send()
                .await?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let wait = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                tracing::warn!(wait, "rate limited, sleeping before retry");
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ZendeskClientError::HttpError { status, body });
            }

            return response
                .json::<serde_json::Value>()
                .await
                .map_err(ZendeskClientError::RequestError);
        }
    }

    /// Lazy page stream over a standard list endpoint. `path_and_query` may
    /// carry filter params; `data_key` names the record array in each body.
    pub fn list_pages<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        data_key: &'static str,
    ) -> ListPages<'_, T> {
        ListPages {
            client: self,
            data_key,
            next_url: Some(format!("{}{}", self.config.base_url, path_and_query)),
            _records: PhantomData,
        }
    }

    /// Lazy page stream over an incremental export endpoint, starting at
    /// `start_time` (epoch seconds). `page_delay` throttles successive page
    /// fetches on high-volume endpoints.
    pub fn export_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        data_key: &'static str,
        start_time: i64,
        page_delay: Option<Duration>,
    ) -> ExportPages<'_, T> {
        ExportPages {
            client: self,
            data_key,
            next_url: Some(format!(
                "{}{}?start_time={}",
                self.config.base_url, path, start_time
            )),
            page_delay,
            fetched_any: false,
            done: false,
            _records: PhantomData,
        }
    }
}

fn next_page_url(body: &serde_json::Value) -> Option<String> {
    body.get("next_page")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}

fn parse_records<T: DeserializeOwned>(
    body: &serde_json::Value,
    data_key: &str,
) -> Result<Vec<T>, ZendeskClientError> {
    match body.get(data_key) {
        Some(value) if !value.is_null() => Ok(serde_json::from_value(value.clone())?),
        _ => Ok(Vec::new()),
    }
}

/// Follows the `next_page` URL in each response until it is absent, yielding
/// one non-empty page of records per call. The next page is not fetched
/// until asked for, so the consumer's persistence rate throttles the fetch
/// rate.
pub struct ListPages<'a, T> {
    client: &'a ZendeskClient,
    data_key: &'static str,
    next_url: Option<String>,
    _records: PhantomData<T>,
}

impl<T: DeserializeOwned> ListPages<'_, T> {
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, ZendeskClientError> {
        while let Some(url) = self.next_url.take() {
            let body = self.client.get_json(&url).await?;
            self.next_url = next_page_url(&body);
            let records = parse_records(&body, self.data_key)?;
            if !records.is_empty() {
                return Ok(Some(records));
            }
        }
        Ok(None)
    }
}

/// One page of an incremental export stream. `end_time` is the server's
/// resume cursor as of this page.
#[derive(Debug)]
pub struct ExportPage<T> {
    pub items: Vec<T>,
    pub end_time: i64,
}

/// Drives the cursor-based export protocol: each page carries an `end_time`
/// cursor and an `end_of_stream` flag, and the stream stops exactly when the
/// flag is set — after yielding that final page. Only the last yielded
/// page's cursor is a valid resumption point.
pub struct ExportPages<'a, T> {
    client: &'a ZendeskClient,
    data_key: &'static str,
    next_url: Option<String>,
    page_delay: Option<Duration>,
    fetched_any: bool,
    done: bool,
    _records: PhantomData<T>,
}

impl<T: DeserializeOwned> ExportPages<'_, T> {
    pub async fn next_page(&mut self) -> Result<Option<ExportPage<T>>, ZendeskClientError> {
        while !self.done {
            let Some(url) = self.next_url.take() else {
                break;
            };

            if self.fetched_any {
                if let Some(delay) = self.page_delay {
                    tokio::time::sleep(delay).await;
                }
            }

            let body = self.client.get_json(&url).await?;
            self.fetched_any = true;

            let end_time = body.get("end_time").and_then(|v| v.as_i64()).ok_or_else(|| {
                ZendeskClientError::Protocol("export page missing end_time cursor".to_string())
            })?;
            self.done = body
                .get("end_of_stream")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            if !self.done {
                self.next_url = next_page_url(&body);
            }

            let items: Vec<T> = parse_records(&body, self.data_key)?;
            if !items.is_empty() {
                return Ok(Some(ExportPage { items, end_time }));
            }
        }
        Ok(None)
    }
}
