use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use tracing::instrument;

use crate::{
    app_state::AppState,
    extractor::{ArticleRequest, ExtractionOutcome, detect_language},
    scrape::dtos::{ScrapeQuery, ScrapeResponse},
};

/// Server-hosted extraction endpoint.
///
/// Applies the full fetch → clean → select → normalize pipeline and always
/// answers 200: a scraping failure surfaces as an explanatory `content`
/// message with `used_fallback` set, never as a 5xx.
#[utoipa::path(
    get,
    path = "/api/scrape",
    tag = "scrape",
    params(ScrapeQuery),
    responses(
        (status = 200, description = "Extraction outcome", body = ScrapeResponse)
    )
)]
#[instrument(skip_all, fields(url = %params.url))]
pub async fn scrape(
    State(state): State<AppState>,
    Query(params): Query<ScrapeQuery>,
) -> Json<ScrapeResponse> {
    let mut request = ArticleRequest::new(params.url);
    if let Some(description) = params.description {
        request = request.with_description(description);
    }

    let outcome = state.extractor.extract(&request).await;
    let language = match &outcome {
        ExtractionOutcome::Success { text } => detect_language(text),
        _ => None,
    };
    let used_fallback = outcome.used_fallback();

    Json(ScrapeResponse {
        content: outcome.into_text(),
        used_fallback,
        language,
        extracted_at: Utc::now(),
    })
}
