use bytes::Bytes;
use chrono::Utc;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::fetcher::{
    encoding::decode_body,
    errors::FetchError,
    types::{Charset, FetchedPage, RawBody, TransportKind},
};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB

/// Many news sites block non-browser user agents, so requests present as a
/// desktop browser arriving from a search result.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const REFERER: &str = "https://www.google.com/";

const DIRECT_TIMEOUT: Duration = Duration::from_secs(10);
const RELAY_TIMEOUT: Duration = Duration::from_secs(15);

/// Percent-encoding set matching JavaScript's `encodeURIComponent`, which is
/// what allorigins-style relays expect for the `url` query parameter.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Validate a caller-supplied URL before any network call. Only HTTP(S)
/// targets are fetchable.
pub fn validate_url(raw: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(raw)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// HTTP client for article fetches. Built once from [`Config`] and shared
/// across requests; transport selection stays with the caller.
pub struct FetchClient {
    http: Client,
    relay_base_url: String,
}

impl FetchClient {
    pub fn new(config: &Config) -> Self {
        let http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                        .parse()
                        .unwrap(),
                );
                headers.insert(
                    reqwest::header::ACCEPT_LANGUAGE,
                    "en-US,en;q=0.9".parse().unwrap(),
                );
                headers.insert(reqwest::header::REFERER, REFERER.parse().unwrap());
                headers.insert(reqwest::header::CACHE_CONTROL, "no-cache".parse().unwrap());
                headers.insert(reqwest::header::PRAGMA, "no-cache".parse().unwrap());
                headers
            })
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            relay_base_url: config.relay_base_url().to_string(),
        }
    }

    /// Fetch `url` over the given transport. Exactly one outbound GET per
    /// invocation; no retry at this layer.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, kind: TransportKind, url: &Url) -> Result<FetchedPage, FetchError> {
        match kind {
            TransportKind::Direct => self.fetch_direct(url).await,
            TransportKind::Relayed => self.fetch_relayed(url).await,
        }
    }

    async fn fetch_direct(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .timeout(DIRECT_TIMEOUT)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();
        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        // Check body size after download (in case Content-Length was missing)
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
        }

        let raw = RawBody {
            bytes: body_bytes,
            content_type: Some(content_type),
        };
        let (text, charset) = decode_body(&raw);
        debug!(charset = ?charset, chars = text.len(), "decoded direct fetch");

        Ok(FetchedPage {
            url_final: final_url,
            transport: TransportKind::Direct,
            text,
            charset,
            fetched_at: Utc::now(),
        })
    }

    async fn fetch_relayed(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let relay_url = format!(
            "{}?url={}",
            self.relay_base_url,
            utf8_percent_encode(url.as_str(), URL_COMPONENT)
        );

        let response = self
            .http
            .get(&relay_url)
            .timeout(RELAY_TIMEOUT)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Relay(format!("relay answered {status}")));
        }

        // The relay fetches server-side and returns an already-decoded body.
        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;
        debug!(chars = text.len(), "relay returned body");

        Ok(FetchedPage {
            url_final: url.clone(),
            transport: TransportKind::Relayed,
            text,
            charset: Charset::Utf8,
            fetched_at: Utc::now(),
        })
    }
}
