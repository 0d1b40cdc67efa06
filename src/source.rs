use std::future::Future;
use std::pin::Pin;

use reqwest::Client;
use tokio::time::Duration;

use crate::article::Article;

/// Path of the publications proxy, relative to the hosting origin.
pub const PROXY_PATH: &str = "/api/serpapi-proxy";

/// Anything that went wrong fetching or decoding the article list.
///
/// The `Display` text is what the page stores as its error message.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Error fetching data: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Article>, FetchError>> + Send + 'a>>;

/// Where the page gets its articles from.
pub trait ArticleSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the full article list. Called at most once per page view.
    fn fetch(&self) -> FetchFuture<'_>;
}

/// Only 2xx responses carry articles.
pub fn check_status(status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::Status(status))
    }
}

/// Map a proxy response to the article list, or to the failure it represents.
///
/// The body must be a JSON array. Each element is decoded on its own, so one
/// odd record never costs the rest of the list.
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<Article>, FetchError> {
    check_status(status)?;
    let records: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    Ok(records.into_iter().filter_map(Article::from_record).collect())
}

/// The SerpAPI proxy served next to the site.
pub struct ProxySource {
    client: Client,
    endpoint: String,
}

impl ProxySource {
    pub fn new(origin: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("publications_page/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: proxy_endpoint(origin),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn proxy_endpoint(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), PROXY_PATH)
}

impl ArticleSource for ProxySource {
    fn name(&self) -> &str {
        "serpapi-proxy"
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            tracing::debug!(endpoint = %self.endpoint, "requesting articles");

            let response = self
                .client
                .get(&self.endpoint)
                .header("Accept", "application/json")
                .send()
                .await?;

            let status = response.status().as_u16();
            check_status(status)?;

            let body = response.bytes().await?;
            decode_response(status, &body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_embeds_code() {
        let err = decode_response(500, b"[]").unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
        assert_eq!(err.to_string(), "Error fetching data: 500");

        assert!(matches!(
            decode_response(404, b"not json"),
            Err(FetchError::Status(404))
        ));
    }

    #[test]
    fn success_decodes_array() {
        let body = br#"[{"title":"Paper 1","link":"x"},{"title":"Paper 1","link":"y"}]"#;
        let articles = decode_response(200, body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].link.as_deref(), Some("y"));
    }

    #[test]
    fn empty_array_is_success() {
        assert!(decode_response(200, b"[]").unwrap().is_empty());
    }

    #[test]
    fn imperfect_records_keep_the_rest() {
        let body = br#"[
            {"title":"Paper 1","link":"x"},
            {"title":"Paper 2"},
            null,
            {"title":"Paper 3","link":"z","year":2019,"cited_by":{"value":null}}
        ]"#;
        let articles = decode_response(200, body).unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[1].title.as_deref(), Some("Paper 2"));
        assert_eq!(articles[1].link, None);
        assert_eq!(articles[2].year_line(), Some("2019"));
        assert_eq!(articles[2].cited_by_count(), None);
    }

    #[test]
    fn status_rule() {
        assert!(check_status(200).is_ok());
        assert!(check_status(204).is_ok());
        assert!(matches!(check_status(302), Err(FetchError::Status(302))));
        assert!(matches!(check_status(503), Err(FetchError::Status(503))));
    }

    #[test]
    fn bad_body_is_decode_error() {
        let err = decode_response(200, br#"{"error":"quota"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn endpoint_joins_origin() {
        assert_eq!(
            proxy_endpoint("http://localhost:3000/"),
            "http://localhost:3000/api/serpapi-proxy"
        );
        let source = ProxySource::new("https://lab.example.org", Duration::from_secs(5)).unwrap();
        assert_eq!(source.endpoint(), "https://lab.example.org/api/serpapi-proxy");
        assert_eq!(source.name(), "serpapi-proxy");
    }
}
