//! Content selection: an ordered cascade of increasingly permissive
//! strategies for locating article body text in a cleaned document.

use once_cell::sync::Lazy;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use crate::extractor::options::ExtractOptions;

/// Likely article-container selectors, tried in document order. The
/// semantic `article` tag plus the content/story/post/entry class and
/// attribute patterns common across news CMSes.
const CONTAINER_SELECTORS: &[&str] = &[
    "article",
    ".article",
    ".post",
    ".content",
    ".main",
    ".story",
    ".entry-content",
    ".post-content",
    r#"[itemprop="articleBody"]"#,
    ".article-body",
    ".article-content",
    ".story-body",
    "#article-body",
    ".story-content",
    ".news-content",
];

static CONTAINER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&CONTAINER_SELECTORS.join(", ")).unwrap());

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// One selection strategy. Returns candidate paragraphs in document order;
/// the orchestrator judges whether their combined length is sufficient
/// before moving to the next tier.
pub trait SelectionTier {
    fn name(&self) -> &'static str;
    fn select(&self, document: &Html, options: &ExtractOptions) -> Vec<String>;
}

/// Tier 1: paragraphs inside recognized article containers.
pub struct ContainerParagraphs;

/// Tier 2: every paragraph in the document.
pub struct AllParagraphs;

/// Tier 3: the full visible body text, unfiltered. Frequently includes
/// navigation remnants that escaped the cleaner's deny-list; intentional
/// last-resort behavior.
pub struct WholeBody;

/// The cascade, cheapest-signal first. Later tiers run only when earlier
/// output is too short, and never the other way around.
pub fn tiers() -> [&'static dyn SelectionTier; 3] {
    [&ContainerParagraphs, &AllParagraphs, &WholeBody]
}

impl SelectionTier for ContainerParagraphs {
    fn name(&self) -> &'static str {
        "container-paragraphs"
    }

    fn select(&self, document: &Html, options: &ExtractOptions) -> Vec<String> {
        let containers: Vec<ElementRef> = document.select(&CONTAINER_SELECTOR).collect();
        let container_ids: HashSet<NodeId> = containers.iter().map(|c| c.id()).collect();

        let mut paragraphs = Vec::new();
        for container in containers {
            // A container nested inside another match would yield its
            // paragraphs twice; only topmost matches contribute.
            if container
                .ancestors()
                .any(|ancestor| container_ids.contains(&ancestor.id()))
            {
                continue;
            }
            for paragraph in container.select(&PARAGRAPH_SELECTOR) {
                push_if_long_enough(&mut paragraphs, paragraph, options.min_paragraph_chars);
            }
        }
        paragraphs
    }
}

impl SelectionTier for AllParagraphs {
    fn name(&self) -> &'static str {
        "all-paragraphs"
    }

    fn select(&self, document: &Html, options: &ExtractOptions) -> Vec<String> {
        let mut paragraphs = Vec::new();
        for paragraph in document.select(&PARAGRAPH_SELECTOR) {
            push_if_long_enough(&mut paragraphs, paragraph, options.min_paragraph_chars);
        }
        paragraphs
    }
}

impl SelectionTier for WholeBody {
    fn name(&self) -> &'static str {
        "whole-body"
    }

    fn select(&self, document: &Html, _options: &ExtractOptions) -> Vec<String> {
        let Some(body) = document.select(&BODY_SELECTOR).next() else {
            return Vec::new();
        };
        let text = body.text().collect::<String>().trim().to_string();
        if text.is_empty() { Vec::new() } else { vec![text] }
    }
}

fn push_if_long_enough(paragraphs: &mut Vec<String>, element: ElementRef, min_chars: usize) {
    let text = element.text().collect::<String>().trim().to_string();
    if text.chars().count() > min_chars {
        paragraphs.push(text);
    }
}
