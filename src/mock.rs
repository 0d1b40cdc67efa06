//! Scripted article source for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::article::Article;
use crate::source::{decode_response, ArticleSource, FetchError, FetchFuture};

#[derive(Clone, Debug)]
pub enum MockResponse {
    /// 200 with these articles.
    Articles(Vec<Article>),
    /// 200 with a raw body, decoded like a real response.
    Body(String),
    /// Non-success status.
    Status(u16),
}

pub struct MockSource {
    response: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
}

impl MockSource {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            delay: None,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl ArticleSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch(&self) -> FetchFuture<'_> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let response = self.response.clone();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match response {
                MockResponse::Articles(articles) => Ok(articles),
                MockResponse::Body(body) => decode_response(200, body.as_bytes()),
                MockResponse::Status(code) => Err(FetchError::Status(code)),
            }
        })
    }
}
