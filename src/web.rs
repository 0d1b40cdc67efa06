use std::sync::Arc;

use warp::{Filter, Reply};

use crate::logs::LogBuffer;
use crate::page::{PageSettings, PublicationsView};
use crate::profiles::FallbackProfiles;
use crate::render::render_page;
use crate::source::ArticleSource;

/// Everything a page request needs, shared across requests.
pub struct AppState {
    pub source: Arc<dyn ArticleSource>,
    pub profiles: FallbackProfiles,
    pub settings: PageSettings,
    pub logs: LogBuffer,
}

pub async fn start_web_server(port: u16, state: Arc<AppState>) {
    let state_filter = warp::any().map(move || state.clone());

    let page = warp::get()
        .and(
            warp::path::end()
                .or(warp::path("publications").and(warp::path::end()))
                .unify(),
        )
        .and(state_filter.clone())
        .and_then(publications_page);

    let get_logs = warp::get()
        .and(warp::path("logs"))
        .and(warp::path::end())
        .and(state_filter.clone())
        .map(|state: Arc<AppState>| warp::reply::json(&state.logs.lines()));

    let routes = page.or(get_logs);

    tracing::info!("Publications page running on http://localhost:{}", port);
    warp::serve(routes).run(([127, 0, 0, 1], port)).await;
}

async fn publications_page(state: Arc<AppState>) -> Result<impl Reply, warp::Rejection> {
    Ok(warp::reply::html(load_page(&state).await))
}

/// Mount a fresh view, let it load, render whatever it has, and unmount it.
pub async fn load_page(state: &AppState) -> String {
    let view = PublicationsView::new(state.source.clone(), &state.settings.dedup_key, state.logs.clone());
    view.mount();

    let snapshot = view.wait_settled(state.settings.render_deadline).await;
    view.unmount();

    render_page(&snapshot, state.settings.empty_response, &state.profiles)
}
