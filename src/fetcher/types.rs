use bytes::Bytes;
use chrono::{DateTime, Utc};
use url::Url;

/// Character encoding of a fetched page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Windows1252,
    ShiftJis,
    Gb2312,
    Big5,
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        use std::ptr;

        if ptr::eq(encoding, encoding_rs::UTF_8) {
            Self::Utf8
        } else if ptr::eq(encoding, encoding_rs::WINDOWS_1252) {
            Self::Windows1252
        } else if ptr::eq(encoding, encoding_rs::SHIFT_JIS) {
            Self::ShiftJis
        } else if ptr::eq(encoding, encoding_rs::GBK) || ptr::eq(encoding, encoding_rs::GB18030) {
            Self::Gb2312
        } else if ptr::eq(encoding, encoding_rs::BIG5) {
            Self::Big5
        } else {
            Self::Other(encoding.name().to_ascii_lowercase())
        }
    }
}

/// Undecoded response body from the direct transport, together with the
/// Content-Type header as a source-encoding hint. Consumed by
/// [`crate::fetcher::encoding::decode_body`] and discarded.
#[derive(Debug)]
pub struct RawBody {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// A fetched, decoded page ready for extraction.
#[derive(Debug)]
pub struct FetchedPage {
    pub url_final: Url,
    pub transport: TransportKind,
    pub text: String,
    pub charset: Charset,
    pub fetched_at: DateTime<Utc>,
}

/// How a page is retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connect straight to the target host.
    Direct,
    /// Send the target URL to a pass-through relay that fetches it
    /// server-side, bypassing cross-origin restrictions.
    Relayed,
}

/// Transport order for article fetches, selected once at startup from the
/// declared execution environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportPolicy {
    /// Trusted backend: try the direct transport, fall back to the relay.
    #[default]
    DirectThenRelay,
    /// Sandboxed or egress-restricted deployment: always relay.
    RelayOnly,
}

impl TransportPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "direct-then-relay" | "backend" => Some(Self::DirectThenRelay),
            "relay-only" | "sandbox" => Some(Self::RelayOnly),
            _ => None,
        }
    }

    /// Transports to attempt, in order. Each is tried at most once per
    /// extraction; there is no same-transport retry.
    pub fn transports(self) -> &'static [TransportKind] {
        match self {
            Self::DirectThenRelay => &[TransportKind::Direct, TransportKind::Relayed],
            Self::RelayOnly => &[TransportKind::Relayed],
        }
    }
}
