//! Show a single post fetched by slug

use anyhow::Result;

use crate::content::SourceError;
use crate::helpers::localized_date;
use crate::readtime;
use crate::Starlog;

/// Fetch one post by slug and print it to stdout
pub async fn run(app: &Starlog, slug: &str) -> Result<()> {
    let post = match app.source().get_by_slug(slug).await {
        Ok(post) => post,
        Err(SourceError::NotFound(slug)) => {
            println!("No post found for \"{}\"", slug);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", post.data.title);
    if !post.data.subtitle.is_empty() {
        println!("{}", post.data.subtitle);
    }
    if let Some(date) = post.first_publication_date {
        println!("{}", localized_date(&date, &app.config.language));
    }
    println!(
        "{} - {} min read",
        post.data.author,
        readtime::estimate(&post.data.content)
    );

    for block in &post.data.content {
        if !block.heading.trim().is_empty() {
            println!("\n## {}", block.heading);
        }
        for span in &block.body {
            if !span.text.trim().is_empty() {
                println!("\n{}", span.text);
            }
        }
    }

    Ok(())
}
