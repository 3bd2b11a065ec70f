pub mod client;
pub mod encoding;
pub mod errors;
pub mod types;

pub use client::{FetchClient, validate_url};
pub use errors::FetchError;
pub use types::{Charset, FetchedPage, TransportKind, TransportPolicy};
