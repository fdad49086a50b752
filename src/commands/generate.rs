//! Generate static files from the content source

use anyhow::{Context, Result};

use crate::generator::Generator;
use crate::pagination::PaginationState;
use crate::Starlog;

/// Fetch every page of posts and generate the static site
pub async fn run(app: &Starlog) -> Result<()> {
    let start = std::time::Instant::now();
    let source = app.source();

    let first_page = source
        .query_posts()
        .await
        .context("failed to query the content source")?;

    let listing = PaginationState::initialize(first_page)
        .fetch_all(&source)
        .await
        .context("failed to fetch all post pages")?;

    tracing::info!("Fetched {} posts from content source", listing.results.len());

    let generator = Generator::new(app);
    generator.generate(&listing.results)?;

    tracing::info!("Generation finished in {:?}", start.elapsed());
    Ok(())
}
