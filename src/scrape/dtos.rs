use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for `GET /api/scrape`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScrapeQuery {
    /// Article URL to extract, percent-encoded by the caller.
    pub url: String,
    /// Optional fallback text from the headline source, substituted when
    /// extraction cannot produce enough article text.
    pub description: Option<String>,
}

/// Always returned with HTTP 200: scraping failure is an expected outcome,
/// not a server error, and `content` carries an explanatory message in
/// that case.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScrapeResponse {
    /// Extracted article text, the substituted description, or a
    /// human-readable failure message.
    pub content: String,
    /// True when `content` is not scraped article text. Callers should
    /// disable dependent features (e.g. summarization) and may show a
    /// disclosure notice.
    pub used_fallback: bool,
    /// ISO 639-3 code detected from successfully extracted text.
    pub language: Option<String>,
    pub extracted_at: DateTime<Utc>,
}
