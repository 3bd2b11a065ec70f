//! Best-effort language detection on extracted text. Advisory metadata
//! only; detection never gates extraction.

use whatlang::detect;

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 50;

/// Detect the language of `text`, returning an ISO 639-3 code such as
/// `eng`. Returns `None` for short or ambiguous input.
pub fn detect_language(text: &str) -> Option<String> {
    if text.trim().len() < MIN_TEXT_LENGTH {
        return None;
    }

    detect(text)
        .filter(|info| info.confidence() >= MIN_CONFIDENCE)
        .map(|info| info.lang().code().to_string())
}
