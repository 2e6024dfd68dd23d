/// FilePursuit search provider
///
/// FilePursuit indexes open web directories. Its JSON endpoint takes a form-encoded
/// POST with the query and a content type filter and answers with a bare array of
/// file records. Anything other than a non-empty array means "no results".
use crate::{
    error::SearchError,
    models::{SearchRecord, Stream},
    services::providers::SearchProvider,
};
use reqwest::Client as HttpClient;

/// Content type filter sent with every search
const CONTENT_TYPE_FILTER: &str = "audio";

#[derive(Clone)]
pub struct FilePursuitProvider {
    http_client: HttpClient,
    search_url: String,
}

impl FilePursuitProvider {
    pub fn new(search_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            search_url,
        }
    }

    /// Maps a raw response body into streams
    ///
    /// Records are converted one by one; a record that cannot become a stream is
    /// skipped rather than failing the whole response.
    fn parse_results(body: &[u8]) -> Result<Vec<Stream>, SearchError> {
        let records: Vec<serde_json::Value> = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(
                error = %e,
                body = %String::from_utf8_lossy(body),
                "Unusable FilePursuit response"
            );
            SearchError::EmptyResult
        })?;

        let total = records.len();
        let streams: Vec<Stream> = records
            .into_iter()
            .filter_map(|record| {
                serde_json::from_value::<SearchRecord>(record)
                    .ok()
                    .and_then(SearchRecord::into_stream)
            })
            .collect();

        if streams.len() < total {
            tracing::debug!(skipped = total - streams.len(), "Skipped unusable FilePursuit records");
        }

        if streams.is_empty() {
            return Err(SearchError::EmptyResult);
        }

        Ok(streams)
    }
}

#[async_trait::async_trait]
impl SearchProvider for FilePursuitProvider {
    async fn search(&self, query: &str) -> Result<Vec<Stream>, SearchError> {
        let response = self
            .http_client
            .post(&self.search_url)
            .form(&[("searchQuery", query), ("type", CONTENT_TYPE_FILTER)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, provider = self.name(), "Search returned non-success status");
        }

        let body = response.bytes().await?;
        let streams = Self::parse_results(&body)?;

        tracing::info!(
            query = %query,
            results = streams.len(),
            provider = self.name(),
            "Search completed"
        );

        Ok(streams)
    }

    fn name(&self) -> &'static str {
        "filepursuit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_results_maps_records_in_order() {
        let body = br#"[
            {"file": "one.mp3", "reg_date": "2020-01-01", "link": "http:\/\/a\/one.mp3"},
            {"file": "two.mp3", "reg_date": "2020-01-02", "filesize": "3 MB", "link": "http:\/\/a\/two.mp3"}
        ]"#;

        let streams = assert_ok!(FilePursuitProvider::parse_results(body));
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].url, "http://a/one.mp3");
        assert_eq!(streams[1].title, "two.mp3\n2020-01-02 | 3 MB");
    }

    #[test]
    fn test_parse_results_empty_array() {
        let result = FilePursuitProvider::parse_results(b"[]");
        assert!(matches!(result, Err(SearchError::EmptyResult)));
    }

    #[test]
    fn test_parse_results_not_an_array() {
        let bodies: [&[u8]; 4] = [br#"{"status": "error"}"#, b"null", b"", b"<html>busy</html>"];
        for body in bodies {
            let result = FilePursuitProvider::parse_results(body);
            assert!(matches!(result, Err(SearchError::EmptyResult)));
        }
    }

    #[test]
    fn test_parse_results_malformed_record() {
        let bodies: [&[u8]; 3] = [br#"[{"file": "x.mp3"}]"#, b"[42]", br#"[null, "x"]"#];
        for body in bodies {
            let result = FilePursuitProvider::parse_results(body);
            assert!(matches!(result, Err(SearchError::EmptyResult)));
        }
    }

    #[test]
    fn test_parse_results_keeps_good_records_next_to_odd_ones() {
        let body = br#"[
            {"file": "good.mp3", "reg_date": "2020-01-01", "link": "http:\/\/a\/good.mp3"},
            {"file": "odd.mp3", "reg_date": null, "link": "http:\/\/a\/odd.mp3"},
            {"file": 7, "reg_date": 20200101, "link": "http:\/\/a\/7"},
            {"file": "no-link.mp3", "reg_date": "2020-01-01"},
            "not a record"
        ]"#;

        let streams = assert_ok!(FilePursuitProvider::parse_results(body));
        assert_eq!(
            streams,
            vec![
                Stream {
                    title: "good.mp3\n2020-01-01".to_string(),
                    url: "http://a/good.mp3".to_string(),
                },
                Stream {
                    title: "odd.mp3\n".to_string(),
                    url: "http://a/odd.mp3".to_string(),
                },
                Stream {
                    title: "7\n20200101".to_string(),
                    url: "http://a/7".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_search_posts_form_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/jsn/v1/search.php"))
            .and(body_string_contains("searchQuery=daft%2520punk"))
            .and(body_string_contains("type=audio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"file": "one.mp3", "reg_date": "2020-01-01", "link": "http:\\\\x\\one.mp3"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let provider = FilePursuitProvider::new(format!("{}/jsn/v1/search.php", server.uri()));
        let streams = assert_ok!(provider.search("daft%20punk").await);

        assert_eq!(
            streams,
            vec![Stream {
                title: "one.mp3\n2020-01-01".to_string(),
                url: "http:xone.mp3".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_search_error_status_without_results() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let provider = FilePursuitProvider::new(server.uri());
        let err = assert_err!(provider.search("anything").await);
        assert!(matches!(err, SearchError::EmptyResult));
    }

    #[tokio::test]
    async fn test_search_transport_failure() {
        // Nothing listens on port 9 (discard) in the test environment
        let provider = FilePursuitProvider::new("http://127.0.0.1:9/search.php".to_string());
        let err = assert_err!(provider.search("anything").await);
        assert!(matches!(err, SearchError::Transport(_)));
    }
}
