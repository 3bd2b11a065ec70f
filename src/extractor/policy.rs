//! The per-request extraction state machine: transport fallback, tier
//! cascade, and the fallback policy deciding what the caller finally gets.

use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::extractor::{
    cleaner,
    model::{ArticleRequest, ExtractionOutcome},
    normalize::{PARAGRAPH_BREAK, normalize},
    options::ExtractOptions,
    selector,
};
use crate::fetcher::{
    FetchClient, validate_url,
    types::{FetchedPage, TransportKind},
};

/// Shown when fetching failed outright and no description was available.
/// `{domain}` names the site so the reader knows where to go.
const FETCH_FAILURE_MESSAGE: &str = "Could not retrieve the article content due to website restrictions. Please visit the original article using the link below.";

/// Shown when the page was fetched but no acceptable amount of article text
/// could be selected and no description was available.
const NO_CONTENT_MESSAGE: &str =
    "Could not retrieve the article content. Please visit the original article using the link below.";

/// The extraction pipeline's single public entry point.
///
/// One instance is built at startup and shared; each [`extract`] call is
/// independent and holds no state beyond its own stack, so calls may run
/// concurrently without coordination.
///
/// [`extract`]: ArticleExtractor::extract
pub struct ArticleExtractor {
    client: FetchClient,
    transports: &'static [TransportKind],
    options: ExtractOptions,
}

impl ArticleExtractor {
    pub fn new(config: &Config) -> Self {
        Self::with_options(config, ExtractOptions::default())
    }

    pub fn with_options(config: &Config, options: ExtractOptions) -> Self {
        Self {
            client: FetchClient::new(config),
            transports: config.transport_policy().transports(),
            options,
        }
    }

    /// Extract article body text for one request.
    ///
    /// Never returns an error: network, parsing, and selection failures all
    /// terminate in one of the [`ExtractionOutcome`] variants.
    #[instrument(skip_all, fields(url = %request.url))]
    pub async fn extract(&self, request: &ArticleRequest) -> ExtractionOutcome {
        let description = request.usable_description();

        // The headline source sometimes ships substantial text already;
        // fetching would add latency for nothing.
        if let Some(description) = description
            && description.chars().count() > self.options.description_shortcut_chars
        {
            debug!("description already substantial, skipping fetch");
            return ExtractionOutcome::FallbackToDescription {
                text: description.to_string(),
            };
        }

        let url = match validate_url(&request.url) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "rejecting unfetchable url");
                return self.failed(&request.url, description);
            }
        };

        let Some(page) = self.fetch_with_fallback(&url).await else {
            return self.failed(&request.url, description);
        };

        let text = self.extract_from_html(&page.text);
        if text.chars().count() >= self.options.min_content_chars {
            info!(chars = text.chars().count(), transport = ?page.transport, "extraction succeeded");
            return ExtractionOutcome::Success { text };
        }

        debug!(
            chars = text.chars().count(),
            "extracted text under acceptance threshold"
        );
        match description {
            Some(description) => ExtractionOutcome::FallbackToDescription {
                text: description.to_string(),
            },
            None => ExtractionOutcome::TerminalFailure {
                message: NO_CONTENT_MESSAGE.to_string(),
            },
        }
    }

    /// Run the cleaner, the tier cascade, and the normalizer over decoded
    /// HTML. Returns the first tier output of acceptable length, otherwise
    /// the last tier's best effort.
    pub fn extract_from_html(&self, html: &str) -> String {
        let document = cleaner::clean(html);

        let mut last = String::new();
        for tier in selector::tiers() {
            let paragraphs = tier.select(&document, &self.options);
            let text = normalize(&paragraphs.join(PARAGRAPH_BREAK));
            if text.chars().count() >= self.options.min_content_chars {
                debug!(tier = tier.name(), "tier produced sufficient text");
                return text;
            }
            debug!(tier = tier.name(), chars = text.chars().count(), "tier insufficient");
            last = text;
        }
        last
    }

    /// Try each transport in policy order exactly once. Invalid-input
    /// failures abort the fallback chain; a relay cannot fix a bad URL.
    async fn fetch_with_fallback(&self, url: &Url) -> Option<FetchedPage> {
        for kind in self.transports {
            match self.client.fetch(*kind, url).await {
                Ok(page) => {
                    info!(transport = ?kind, final_url = %page.url_final, "fetched page");
                    return Some(page);
                }
                Err(e) if e.is_invalid_input() => {
                    warn!(transport = ?kind, error = %e, "unfetchable input");
                    return None;
                }
                Err(e) => {
                    warn!(transport = ?kind, error = %e, "transport failed");
                }
            }
        }
        None
    }

    fn failed(&self, raw_url: &str, description: Option<&str>) -> ExtractionOutcome {
        if let Some(description) = description {
            info!("falling back to caller-supplied description");
            return ExtractionOutcome::FallbackToDescription {
                text: description.to_string(),
            };
        }
        ExtractionOutcome::TerminalFailure {
            message: fetch_failure_message(raw_url),
        }
    }
}

fn fetch_failure_message(raw_url: &str) -> String {
    match Url::parse(raw_url).ok().and_then(|u| u.host_str().map(String::from)) {
        Some(domain) => format!(
            "Could not retrieve content from {domain}. This may be due to the website's protection or CORS policy. Please visit the original article."
        ),
        None => FETCH_FAILURE_MESSAGE.to_string(),
    }
}
