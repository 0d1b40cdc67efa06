use std::fmt::Write;

use crate::article::Article;
use crate::page::{EmptyResponse, View, ViewState};
use crate::profiles::FallbackProfiles;

const SAFE_LINK: &str = r#"target="_blank" rel="noopener noreferrer""#;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Full HTML document for the current state of a page view.
pub fn render_page(state: &ViewState, empty_response: EmptyResponse, profiles: &FallbackProfiles) -> String {
    let body = match state.view(empty_response) {
        View::Fallback => render_fallback(profiles),
        View::Loading => "<p class=\"loading\">Loading...</p>".to_string(),
        View::NoPublications => "<p class=\"empty\">No publications found.</p>".to_string(),
        View::Articles(articles) => render_articles(articles),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Research Publications</title>
    <style>
        body {{ font-family: Arial; margin: 0; background: #fff; color: #222; }}
        section {{ display: flex; flex-direction: column; align-items: center; margin: 80px 0; }}
        .container {{ width: 60%; min-width: 320px; }}
        h1 {{ font-size: 48px; text-align: center; margin-bottom: 20px; }}
        h1 span {{ color: #0891b2; }}
        .lead {{ text-align: center; font-weight: 300; margin-bottom: 40px; }}

        .profiles {{ display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }}
        .profile {{ display: block; border: 1px solid #ddd; border-radius: 8px; padding: 20px; color: inherit; text-decoration: none; }}
        .profile:hover {{ background: #ecfeff; }}
        .profile h2 {{ font-size: 18px; margin: 0; }}
        .profile .tags {{ font-size: 14px; font-weight: 300; color: #0e7490; margin-bottom: 16px; }}
        .profile .visit {{ font-size: 14px; font-weight: 300; color: #374151; }}

        .article {{ padding-bottom: 12px; }}
        .article strong {{ margin-right: 8px; }}
        .article a {{ color: #0891b2; text-decoration: none; }}
        .article a:hover {{ text-decoration: underline; }}
        .meta {{ font-size: 14px; color: #4b5563; }}
    </style>
</head>
<body>
    <section>
        <div class="container">
            <h1>Research <span>Publications</span></h1>
            <p class="lead">Explore the extensive work published by our team.</p>
            {}
        </div>
    </section>
</body>
</html>"#,
        body
    )
}

fn render_fallback(profiles: &FallbackProfiles) -> String {
    let mut out = String::from("<div class=\"profiles\">\n");
    for profile in profiles.iter() {
        let _ = writeln!(
            out,
            "<a class=\"profile\" href=\"{}\" {}><h2>{}</h2><p class=\"tags\">{}</p><p class=\"visit\">Visit Google Scholar Profile</p></a>",
            html_escape(&profile.link),
            SAFE_LINK,
            html_escape(&profile.name),
            html_escape(&profile.tags()),
        );
    }
    out.push_str("</div>");
    out
}

fn render_articles(articles: &[Article]) -> String {
    let mut out = String::from("<div class=\"articles\">\n");
    for (idx, article) in articles.iter().enumerate() {
        let href = article
            .link
            .as_deref()
            .map(|link| format!(" href=\"{}\"", html_escape(link)))
            .unwrap_or_default();
        let _ = write!(
            out,
            "<div class=\"article\" data-key=\"{}\"><strong>{}.</strong><a{} {}>{}</a><div class=\"meta\">",
            html_escape(&article.list_key(idx)),
            idx + 1,
            href,
            SAFE_LINK,
            html_escape(article.title.as_deref().unwrap_or_default()),
        );

        if let Some(authors) = article.authors_line() {
            let _ = write!(out, "<div>Authors: {}</div>", html_escape(authors));
        }
        if let Some(year) = article.year_line() {
            let _ = write!(out, "<div>Year: {}</div>", html_escape(year));
        }
        if let Some(count) = article.cited_by_count() {
            let _ = write!(out, "<div>Cited by: {}</div>", count);
        }

        out.push_str("</div></div>\n");
    }
    out.push_str("</div>");
    out
}
