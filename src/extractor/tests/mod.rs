use std::fs;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::Config;
use crate::extractor::{ArticleExtractor, ArticleRequest, ExtractionOutcome};
use crate::fetcher::types::TransportPolicy;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Relay base that refuses connections immediately.
const DEAD_RELAY: &str = "http://127.0.0.1:1/raw";

fn article_fixture() -> String {
    fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture")
}

fn sparse_fixture() -> String {
    fs::read_to_string("src/extractor/tests/fixtures/sparse.html")
        .expect("Failed to read test fixture")
}

fn backend_extractor(relay_base: impl Into<String>) -> ArticleExtractor {
    let config = Config::new(
        "127.0.0.1:0",
        relay_base,
        TransportPolicy::DirectThenRelay,
    );
    ArticleExtractor::new(&config)
}

#[tokio::test]
async fn extracts_article_over_direct_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(article_fixture(), HTML_CONTENT_TYPE))
        .mount(&server)
        .await;

    let extractor = backend_extractor(DEAD_RELAY);
    let request = ArticleRequest::new(format!("{}/article", server.uri()));
    let outcome = extractor.extract(&request).await;

    let ExtractionOutcome::Success { text } = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert!(text.contains("The city council voted seven to two"));
    assert!(text.contains("forty thousand passengers a day"));
    // Article paragraphs stay separated by exactly one blank line.
    assert!(text.contains("published timetable.\n\n") || text.ends_with("published timetable."));
    // Chrome, ads, social widgets, comments, and scripts are all gone.
    assert!(!text.contains("Subscribe today"));
    assert!(!text.contains("Premium widgets"));
    assert!(!text.contains("Share this story"));
    assert!(!text.contains("Great article"));
    assert!(!text.contains("dataLayer"));
    assert!(!text.contains('<'));
}

#[tokio::test]
async fn falls_back_to_relay_when_direct_is_blocked() {
    let server = MockServer::start().await;
    let target = format!("{}/article", server.uri());

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(query_param("url", target.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_raw(article_fixture(), HTML_CONTENT_TYPE))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = backend_extractor(format!("{}/raw", server.uri()));
    let outcome = extractor.extract(&ArticleRequest::new(target)).await;

    let ExtractionOutcome::Success { text } = outcome else {
        panic!("expected success via relay, got {outcome:?}");
    };
    assert!(text.contains("riverside transit line"));
}

#[tokio::test]
async fn relay_only_policy_never_fetches_directly() {
    let server = MockServer::start().await;
    let target = format!("{}/article", server.uri());

    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(query_param("url", target.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_raw(article_fixture(), HTML_CONTENT_TYPE))
        .mount(&server)
        .await;

    let config = Config::new(
        "127.0.0.1:0",
        format!("{}/raw", server.uri()),
        TransportPolicy::RelayOnly,
    );
    let extractor = ArticleExtractor::new(&config);
    let outcome = extractor.extract(&ArticleRequest::new(target)).await;

    assert!(outcome.is_success());
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() == "/raw"));
}

#[tokio::test]
async fn sparse_page_falls_back_to_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sparse"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sparse_fixture(), HTML_CONTENT_TYPE))
        .mount(&server)
        .await;

    let extractor = backend_extractor(DEAD_RELAY);
    let request = ArticleRequest::new(format!("{}/sparse", server.uri()))
        .with_description("A short match report from the wire service.");
    let outcome = extractor.extract(&request).await;

    assert_eq!(
        outcome,
        ExtractionOutcome::FallbackToDescription {
            text: "A short match report from the wire service.".to_string()
        }
    );
}

#[tokio::test]
async fn sparse_page_without_description_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sparse"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sparse_fixture(), HTML_CONTENT_TYPE))
        .mount(&server)
        .await;

    let extractor = backend_extractor(DEAD_RELAY);
    let request = ArticleRequest::new(format!("{}/sparse", server.uri()));
    let outcome = extractor.extract(&request).await;

    let ExtractionOutcome::TerminalFailure { message } = outcome else {
        panic!("expected terminal failure, got {outcome:?}");
    };
    assert!(message.contains("Could not retrieve the article content"));
}

#[tokio::test]
async fn unreachable_site_with_description_uses_description() {
    let extractor = backend_extractor(DEAD_RELAY);
    let request = ArticleRequest::new("http://127.0.0.1:1/story")
        .with_description("The supplied description survives verbatim.");
    let outcome = extractor.extract(&request).await;

    assert_eq!(
        outcome,
        ExtractionOutcome::FallbackToDescription {
            text: "The supplied description survives verbatim.".to_string()
        }
    );
}

#[tokio::test]
async fn unreachable_site_without_description_is_terminal() {
    let extractor = backend_extractor(DEAD_RELAY);
    let request = ArticleRequest::new("http://127.0.0.1:1/story");
    let outcome = extractor.extract(&request).await;

    let ExtractionOutcome::TerminalFailure { message } = outcome else {
        panic!("expected terminal failure, got {outcome:?}");
    };
    assert!(message.contains("127.0.0.1"));
    assert!(message.contains("CORS"));
}

#[tokio::test]
async fn long_description_skips_fetching_entirely() {
    let server = MockServer::start().await;
    let description = "x".repeat(301);

    let extractor = backend_extractor(format!("{}/raw", server.uri()));
    let request = ArticleRequest::new(format!("{}/article", server.uri()))
        .with_description(description.clone());
    let outcome = extractor.extract(&request).await;

    assert_eq!(
        outcome,
        ExtractionOutcome::FallbackToDescription { text: description }
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_scheme_never_touches_the_network() {
    let server = MockServer::start().await;

    let extractor = backend_extractor(format!("{}/raw", server.uri()));
    let request =
        ArticleRequest::new("ftp://example.com/story").with_description("From the description.");
    let outcome = extractor.extract(&request).await;

    assert_eq!(
        outcome,
        ExtractionOutcome::FallbackToDescription {
            text: "From the description.".to_string()
        }
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn two_sentences_and_a_script_extract_cleanly() {
    let first = "Sentence one is long enough to count, carrying well over the minimum number of characters required for a kept paragraph.";
    let second = "Sentence two is also sufficiently long to count, pushing the combined total comfortably past the acceptance threshold.";
    let html = format!(
        "<html><body><article><p>{first}</p><p>{second}</p></article><script>evil()</script></body></html>"
    );

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, HTML_CONTENT_TYPE))
        .mount(&server)
        .await;

    let extractor = backend_extractor(DEAD_RELAY);
    let request = ArticleRequest::new(format!("{}/two", server.uri()));
    let outcome = extractor.extract(&request).await;

    assert_eq!(
        outcome,
        ExtractionOutcome::Success {
            text: format!("{first}\n\n{second}")
        }
    );
}

#[tokio::test]
async fn windows_1252_page_decodes_before_extraction() {
    let paragraph = "The café on the corner has served espresso to the press corps daily since the nineteen-fifties, according to the owner. ".repeat(2);
    let html = format!("<html><body><article><p>{paragraph}</p></article></body></html>");
    let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(&html);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cafe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(encoded.into_owned(), "text/html; charset=windows-1252"),
        )
        .mount(&server)
        .await;

    let extractor = backend_extractor(DEAD_RELAY);
    let request = ArticleRequest::new(format!("{}/cafe", server.uri()));
    let outcome = extractor.extract(&request).await;

    let ExtractionOutcome::Success { text } = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert!(text.contains("café"));
}

#[tokio::test]
async fn truncated_markup_still_extracts() {
    let prose = "Malformed pages happen constantly in the wild and extraction has to shrug them off without complaint. ".repeat(3);
    let html = format!("<html><body><article><p>{prose}");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, HTML_CONTENT_TYPE))
        .mount(&server)
        .await;

    let extractor = backend_extractor(DEAD_RELAY);
    let request = ArticleRequest::new(format!("{}/broken", server.uri()));
    let outcome = extractor.extract(&request).await;

    let ExtractionOutcome::Success { text } = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert!(text.contains("Malformed pages happen constantly"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::extractor::normalize::normalize;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_from_html_never_panics(html in ".*") {
            let extractor = backend_extractor(DEAD_RELAY);
            let _ = extractor.extract_from_html(&html);
        }

        #[test]
        fn normalize_is_idempotent_on_arbitrary_input(text in ".*") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
