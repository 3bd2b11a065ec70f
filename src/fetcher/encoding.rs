//! Character-encoding detection and decoding for the direct transport.
//!
//! The relay transport returns already-decoded text, so only raw direct
//! fetches pass through here. Decoding never fails: undecodable byte
//! sequences degrade to replacement characters rather than an error.

use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

use crate::fetcher::types::{Charset, RawBody};

/// Only the head of the document is scanned for `<meta>` charset hints.
const META_SCAN_LIMIT: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Decode a raw response body to UTF-8 text.
pub fn decode_body(raw: &RawBody) -> (String, Charset) {
    let encoding = detect_encoding(raw.content_type.as_deref(), &raw.bytes);
    let (decoded, _encoding, _had_errors) = encoding.decode(&raw.bytes);
    (decoded.into_owned(), Charset::from_encoding(encoding))
}

fn detect_encoding(content_type: Option<&str>, body_bytes: &[u8]) -> &'static Encoding {
    // 1. Check Content-Type header for charset
    if let Some(ct) = content_type
        && let Some(captures) = CHARSET_REGEX.captures(ct)
        && let Some(charset_str) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(charset_str.as_str().as_bytes())
    {
        return encoding;
    }

    // 2. Check for <meta charset> hints in the document head
    let search_bytes = &body_bytes[..body_bytes.len().min(META_SCAN_LIMIT)];
    let search_str = String::from_utf8_lossy(search_bytes);

    for meta_regex in [&META_CHARSET_REGEX, &META_HTTP_EQUIV_REGEX] {
        if let Some(captures) = meta_regex.captures(&search_str)
            && let Some(charset_str) = captures.get(1)
            && let Some(encoding) = Encoding::for_label(charset_str.as_str().as_bytes())
        {
            return encoding;
        }
    }

    // 3. Heuristic detection; chardetng falls back to UTF-8 on its own when
    // the sample is inconclusive.
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    detector.guess(None, true)
}
