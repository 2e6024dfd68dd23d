/// Search provider abstraction
///
/// The stream handler only needs "turn a query into streams". Keeping that behind
/// a trait lets the handlers run against a mock in tests and leaves room for
/// other open-directory indexes next to FilePursuit.
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{error::SearchError, models::Stream};

pub mod filepursuit;

pub use filepursuit::FilePursuitProvider;

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a query the way the search endpoint expects to receive it
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, URI_COMPONENT).to_string()
}

/// Trait for stream search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs one search for an already percent-encoded query
    ///
    /// Returns the streams in provider order, or an error when the call fails or
    /// yields no usable records. Implementations never retry.
    async fn search(&self, query: &str) -> Result<Vec<Stream>, SearchError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query_matches_uri_component_rules() {
        assert_eq!(encode_query("daft punk"), "daft%20punk");
        assert_eq!(encode_query("rock & roll!!"), "rock%20%26%20roll!!");
        assert_eq!(encode_query("a/b?c=d#e"), "a%2Fb%3Fc%3Dd%23e");
        assert_eq!(encode_query("it's (live) *~._-"), "it's%20(live)%20*~._-");
    }

    #[test]
    fn test_encode_query_uses_utf8() {
        assert_eq!(encode_query("Björk"), "Bj%C3%B6rk");
    }
}
