use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::ValueEnum;
use tokio::sync::watch;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::article::Article;
use crate::dedup::dedup_by_field;
use crate::logs::LogBuffer;
use crate::source::ArticleSource;

/// What to show when the proxy answers with an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EmptyResponse {
    /// Stay on the loading placeholder, as the page always has.
    #[default]
    KeepLoading,
    /// Show a "no publications" notice instead.
    ShowNone,
}

#[derive(Debug, Clone)]
pub struct PageSettings {
    pub dedup_key: String,
    pub empty_response: EmptyResponse,
    pub render_deadline: Duration,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            dedup_key: "title".to_string(),
            empty_response: EmptyResponse::default(),
            render_deadline: Duration::from_secs(10),
        }
    }
}

/// Page-local state: the loaded articles and the load error.
///
/// Both start empty and are written at most once, when the load settles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub articles: Vec<Article>,
    pub error: String,
    pub settled: bool,
}

/// Which of the mutually exclusive views a state renders as.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Fallback,
    Loading,
    NoPublications,
    Articles(&'a [Article]),
}

impl ViewState {
    pub fn view(&self, empty_response: EmptyResponse) -> View<'_> {
        if !self.error.is_empty() {
            View::Fallback
        } else if self.articles.is_empty() {
            match empty_response {
                EmptyResponse::ShowNone if self.settled => View::NoPublications,
                _ => View::Loading,
            }
        } else {
            View::Articles(&self.articles)
        }
    }
}

/// One mounted instance of the publications page.
///
/// `mount` starts the only fetch this view will ever make. Dropping or
/// unmounting the view cancels it, and a result arriving afterwards is
/// discarded.
pub struct PublicationsView {
    source: Arc<dyn ArticleSource>,
    dedup_key: String,
    logs: LogBuffer,
    state: Arc<watch::Sender<ViewState>>,
    cancel: CancellationToken,
    mounted: AtomicBool,
}

impl PublicationsView {
    pub fn new(source: Arc<dyn ArticleSource>, dedup_key: &str, logs: LogBuffer) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            source,
            dedup_key: dedup_key.to_string(),
            logs,
            state: Arc::new(state),
            cancel: CancellationToken::new(),
            mounted: AtomicBool::new(false),
        }
    }

    pub fn mount(&self) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return;
        }

        let source = self.source.clone();
        let state = self.state.clone();
        let cancel = self.cancel.clone();
        let dedup_key = self.dedup_key.clone();
        let logs = self.logs.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = source.fetch() => result,
            };

            if cancel.is_cancelled() {
                return;
            }

            match result {
                Ok(fetched) => {
                    let total = fetched.len();
                    let articles = dedup_by_field(fetched, &dedup_key);
                    logs.info(&format!(
                        "Loaded {} articles from {} ({} duplicates dropped)",
                        articles.len(),
                        source.name(),
                        total - articles.len()
                    ));
                    state.send_modify(|s| {
                        s.articles = articles;
                        s.settled = true;
                    });
                }
                Err(e) => {
                    logs.error(&format!("Fetching articles from {} failed: {}", source.name(), e));
                    let mut message = e.to_string();
                    if message.is_empty() {
                        message = "unknown error".to_string();
                    }
                    state.send_modify(|s| {
                        s.error = message;
                        s.settled = true;
                    });
                }
            }
        });
    }

    /// Wait until the load settles or `deadline` passes, then return the state.
    pub async fn wait_settled(&self, deadline: Duration) -> ViewState {
        let mut rx = self.state.subscribe();
        let settled = async move { rx.wait_for(|s| s.settled).await.is_ok() };
        if tokio::time::timeout(deadline, settled).await.is_err() {
            tracing::debug!("render deadline passed before the articles arrived");
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn unmount(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PublicationsView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
