//! Tunable thresholds for content selection and the fallback policy.

/// Length thresholds, in Unicode scalar values.
///
/// All fields are public for easy configuration; `Default::default()` gives
/// the standard settings.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Minimum trimmed paragraph length kept by the paragraph tiers.
    /// Shorter chunks are treated as captions, bylines, or boilerplate
    /// fragments.
    ///
    /// Default: `30`
    pub min_paragraph_chars: usize,

    /// Minimum total extracted length for a tier's output to be accepted,
    /// and for the final text to count as a successful extraction.
    ///
    /// Default: `200`
    pub min_content_chars: usize,

    /// When the caller-supplied description is longer than this, fetching
    /// is skipped entirely and the description is returned as-is.
    ///
    /// Default: `300`
    pub description_shortcut_chars: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_paragraph_chars: 30,
            min_content_chars: 200,
            description_shortcut_chars: 300,
        }
    }
}
