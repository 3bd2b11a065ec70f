/// Immutable input to one extraction call.
#[derive(Debug, Clone)]
pub struct ArticleRequest {
    pub url: String,
    /// Caller-supplied fallback text, usually the headline source's
    /// description field.
    pub description: Option<String>,
}

impl ArticleRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The description, if present and non-blank. Returned as supplied;
    /// fallback output must match the caller's text exactly.
    pub(crate) fn usable_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}

/// Result of one extraction call. Extraction never errors; every failure
/// path terminates in one of these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Scraped article text of acceptable length.
    Success { text: String },
    /// The caller's description was substituted. A soft failure: the caller
    /// gets usable text but must know it was not scraped, e.g. to disable
    /// downstream summarization or show a disclosure notice.
    FallbackToDescription { text: String },
    /// Neither scraped content nor a description was available.
    TerminalFailure { message: String },
}

impl ExtractionOutcome {
    /// The text a caller should display, whichever variant occurred.
    pub fn text(&self) -> &str {
        match self {
            Self::Success { text } | Self::FallbackToDescription { text } => text,
            Self::TerminalFailure { message } => message,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Success { text } | Self::FallbackToDescription { text } => text,
            Self::TerminalFailure { message } => message,
        }
    }

    /// True when the returned text is substituted or explanatory rather
    /// than scraped article content.
    pub fn used_fallback(&self) -> bool {
        !matches!(self, Self::Success { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
