//! HTTP server for the listing, post pages, and the load-more API

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{ContentSource, SourceError};
use crate::generator;
use crate::helpers::html_escape;
use crate::pagination::PaginationState;
use crate::Starlog;

/// Load-more script injected into the listing page. Disables the button
/// while a fetch is in flight, so load-more requests stay serialized.
const LOAD_MORE_SCRIPT: &str = r#"
<script>
(function() {
    var button = document.getElementById('load-more');
    if (!button) return;
    button.addEventListener('click', function() {
        var cursor = button.getAttribute('data-cursor');
        button.disabled = true;
        fetch('/api/posts?cursor=' + encodeURIComponent(cursor))
            .then(function(res) {
                if (!res.ok) throw new Error('load failed');
                return res.json();
            })
            .then(function(page) {
                var list = document.getElementById('posts');
                page.results.forEach(function(post) {
                    var item = document.createElement('article');
                    var link = document.createElement('a');
                    link.href = '/post/' + post.uid + '/';
                    link.textContent = post.data.title || post.uid;
                    var title = document.createElement('h2');
                    title.appendChild(link);
                    item.appendChild(title);
                    if (post.data.subtitle) {
                        var subtitle = document.createElement('p');
                        subtitle.textContent = post.data.subtitle;
                        item.appendChild(subtitle);
                    }
                    list.appendChild(item);
                });
                if (page.next_page) {
                    button.setAttribute('data-cursor', page.next_page);
                    button.disabled = false;
                } else {
                    button.remove();
                }
            })
            .catch(function() { button.disabled = false; });
    });
})();
</script>
"#;

/// Server state
struct ServerState {
    app: Starlog,
    source: ContentSource,
}

/// Start the server
pub async fn start(app: &Starlog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        source: app.source(),
        app: app.clone(),
    });

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/post/:slug", get(post_handler))
        .route("/post/:slug/", get(post_handler))
        .route("/api/posts", get(load_more_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Listing page: first page of posts plus a load-more control when the
/// source reports further pages
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let page = match state.source.query_posts().await {
        Ok(page) => page,
        Err(err) => return error_response(err),
    };

    let listing = PaginationState::initialize(page);

    let footer = match listing.next_cursor.as_deref().filter(|c| !c.is_empty()) {
        Some(cursor) => format!(
            r#"<button id="load-more" data-cursor="{}">Load more posts</button>{}"#,
            html_escape(cursor),
            LOAD_MORE_SCRIPT
        ),
        None => String::new(),
    };

    Html(generator::index_page_html(
        &state.app.config,
        &listing.results,
        &footer,
    ))
    .into_response()
}

/// Single post page, with a distinct not-found fallback
async fn post_handler(
    Path(slug): Path<String>,
    State(state): State<Arc<ServerState>>,
) -> Response {
    match state.source.get_by_slug(&slug).await {
        Ok(post) => Html(generator::post_page_html(&state.app.config, &post)).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct LoadMoreQuery {
    cursor: Option<String>,
}

/// Incremental fetch endpoint: resolves a cursor into the next page of
/// results, returned as JSON for the client-side accumulator
async fn load_more_handler(
    Query(query): Query<LoadMoreQuery>,
    State(state): State<Arc<ServerState>>,
) -> Response {
    use crate::content::PageFetcher;

    let Some(cursor) = query.cursor.filter(|c| !c.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "missing cursor").into_response();
    };

    match state.source.fetch_page(&cursor).await {
        Ok(page) => Json(page).into_response(),
        Err(err) => error_response(err),
    }
}

/// Map source errors onto user-visible responses; not-found stays
/// distinct from source outages
fn error_response(err: SourceError) -> Response {
    match err {
        SourceError::NotFound(slug) => {
            tracing::debug!("Post not found: {}", slug);
            (
                StatusCode::NOT_FOUND,
                Html(format!(
                    "<h1>Post not found</h1><p>No post exists for \"{}\".</p>",
                    html_escape(&slug)
                )),
            )
                .into_response()
        }
        err => {
            tracing::error!("Content source error: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Html("<h1>Content source unavailable</h1>".to_string()),
            )
                .into_response()
        }
    }
}
