//! List content from the source

use anyhow::Result;

use crate::helpers::format_date;
use crate::pagination::PaginationState;
use crate::readtime;
use crate::Starlog;

/// List posts (or authors) known to the content source
pub async fn run(app: &Starlog, content_type: &str) -> Result<()> {
    let source = app.source();
    let first_page = source.query_posts().await?;
    let listing = PaginationState::initialize(first_page)
        .fetch_all(&source)
        .await?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", listing.results.len());
            for post in &listing.results {
                let date = post
                    .first_publication_date
                    .map(|d| format_date(&d, &app.config.date_format))
                    .unwrap_or_else(|| "unpublished".to_string());
                println!(
                    "  {} - {} [{}] ({} min)",
                    date,
                    post.data.title,
                    post.slug,
                    readtime::estimate(&post.data.content)
                );
            }
        }
        "author" | "authors" => {
            let mut authors: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &listing.results {
                *authors.entry(post.data.author.clone()).or_insert(0) += 1;
            }
            println!("Authors ({}):", authors.len());
            let mut authors: Vec<_> = authors.into_iter().collect();
            authors.sort_by(|a, b| b.1.cmp(&a.1));
            for (author, count) in authors {
                println!("  {} ({})", author, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, author", content_type);
        }
    }

    Ok(())
}
