// ┌─┐┬ ┬┌┐ ┬  ┬┌─┐┌─┐┌┬┐┬┌─┐┌┐┌┌─┐
// ├─┘│ │├┴┐│  ││  ├─┤ │ ││ ││││└─┐
// ┴  └─┘└─┘┴─┘┴└─┘┴ ┴ ┴ ┴└─┘┘└┘└─┘

// Serves the research publications page from the SerpAPI proxy,
// falling back to the team's Google Scholar profiles.

// Copyright 2025 Servus Altissimi (Pseudonym)

// Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction, including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
// The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod article;
mod dedup;
mod logs;
#[cfg(test)]
mod mock;
mod page;
mod profiles;
mod render;
mod source;
mod web;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::logs::LogBuffer;
use crate::page::{EmptyResponse, PageSettings};
use crate::profiles::FallbackProfiles;
use crate::source::ProxySource;
use crate::web::AppState;

// CL arguments for config
#[derive(Parser, Debug)]
#[command(author, version, about = "Research publications page backed by a SerpAPI proxy", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "6601")]
    port: u16,

    /// Origin hosting /api/serpapi-proxy
    #[arg(short, long, default_value = "http://localhost:3000")]
    origin: String,

    /// HTTP timeout for the proxy, in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    #[arg(long, default_value = "10000")]
    render_deadline_ms: u64,

    #[arg(long, default_value = "title")]
    dedup_key: String,

    #[arg(long, value_enum, default_value_t = EmptyResponse::KeepLoading)]
    empty_response: EmptyResponse,

    /// JSON file with fallback profiles (defaults to the built-in four)
    #[arg(long)]
    profiles: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let profiles = FallbackProfiles::load(args.profiles.as_deref())?;
    let source = ProxySource::new(&args.origin, Duration::from_secs(args.timeout))?;

    tracing::info!(endpoint = source.endpoint(), "articles source");
    tracing::info!(profiles = profiles.len(), dedup_key = %args.dedup_key, "fallback profiles loaded");

    let state = Arc::new(AppState {
        source: Arc::new(source),
        profiles,
        settings: PageSettings {
            dedup_key: args.dedup_key,
            empty_response: args.empty_response,
            render_deadline: Duration::from_millis(args.render_deadline_ms),
        },
        logs: LogBuffer::default(),
    });

    web::start_web_server(args.port, state).await;
    Ok(())
}
