//! Markup cleaning: strip elements that are structurally unlikely to hold
//! article prose before content selection runs.

use once_cell::sync::Lazy;
use ego_tree::NodeId;
use scraper::{Html, Selector};

/// Tags whose subtrees never contribute article text: scripting, chrome,
/// embeds, forms, media.
const DENY_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "iframe", "noscript", "svg", "form",
    "button", "img", "video", "audio",
];

/// Class tokens and ids that mark ad, social, and overlay furniture. An
/// element is removed when any class token or its id equals one of these.
pub const DENY_CLASS_TOKENS: &[&str] = &[
    "ad",
    "ads",
    "advertisement",
    "banner",
    "promo",
    "promotion",
    "sidebar",
    "comments",
    "share",
    "social",
    "cookie-notice",
    "cookie-banner",
    "popup",
    "modal",
];

static DENY_TAG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&DENY_TAGS.join(", ")).unwrap());

static ATTRIBUTED_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("[class], [id]").unwrap());

/// Parse `html` leniently and strip non-content subtrees in one pass.
///
/// The set of matches is computed against the original tree, then every
/// match is detached, so removal order cannot affect the result. Parsing
/// never fails; malformed input yields whatever structure html5ever
/// recovers.
pub fn clean(html: &str) -> Html {
    let mut document = Html::parse_document(html);

    let mut doomed: Vec<NodeId> = document
        .select(&DENY_TAG_SELECTOR)
        .map(|element| element.id())
        .collect();
    for element in document.select(&ATTRIBUTED_SELECTOR) {
        if has_denied_token(element.value()) {
            doomed.push(element.id());
        }
    }

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document
}

fn has_denied_token(element: &scraper::node::Element) -> bool {
    let class_denied = element.classes().any(|class| {
        let token = class.to_ascii_lowercase();
        DENY_CLASS_TOKENS.contains(&token.as_str())
    });
    class_denied
        || element.id().is_some_and(|id| {
            let token = id.to_ascii_lowercase();
            DENY_CLASS_TOKENS.contains(&token.as_str())
        })
}
