//! Generator module - writes static HTML pages for fetched posts

use anyhow::Result;
use std::fs;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{html_escape, time_tag};
use crate::readtime;
use crate::render;
use crate::Starlog;

/// Teaser length on listing pages, in characters
const EXCERPT_LENGTH: usize = 200;

/// Static site generator
pub struct Generator {
    app: Starlog,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Starlog) -> Self {
        Self { app: app.clone() }
    }

    /// Generate the entire site from the accumulated posts.
    ///
    /// Posts are written in fetch order: the listing contract guarantees
    /// that order and nothing here re-sorts it.
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.app.public_dir)?;

        self.generate_index_pages(posts)?;
        self.generate_post_pages(posts)?;

        tracing::info!(
            "Generated {} posts into {:?}",
            posts.len(),
            self.app.public_dir
        );
        Ok(())
    }

    /// Generate index pages (with pagination)
    fn generate_index_pages(&self, posts: &[Post]) -> Result<()> {
        let config = &self.app.config;
        let per_page = config.page_size.max(1);

        let chunks: Vec<&[Post]> = if posts.is_empty() {
            vec![&[]]
        } else {
            posts.chunks(per_page).collect()
        };
        let total = chunks.len();

        for (index, chunk) in chunks.iter().enumerate() {
            let page_num = index + 1;
            let pager = pager_html(config, page_num, total);
            let html = index_page_html(config, chunk, &pager);

            let path = if page_num == 1 {
                self.app.public_dir.join("index.html")
            } else {
                self.app
                    .public_dir
                    .join("page")
                    .join(page_num.to_string())
                    .join("index.html")
            };

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, html)?;
            tracing::debug!("Wrote index page {}/{}", page_num, total);
        }

        Ok(())
    }

    /// Generate one page per post under post/<slug>/
    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        for post in posts {
            let html = post_page_html(&self.app.config, post);
            let dir = self.app.public_dir.join("post").join(&post.slug);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("index.html"), html)?;
        }
        Ok(())
    }
}

/// Render a full listing page; `footer` carries the pager or the
/// load-more control, depending on who is asking.
pub fn index_page_html(config: &SiteConfig, posts: &[Post], footer: &str) -> String {
    let mut items = String::new();
    for post in posts {
        items.push_str(&listing_item(config, post));
    }

    let body = format!(
        "<header><h1>{}</h1><p>{}</p></header>\n<main id=\"posts\">\n{}</main>\n{}",
        html_escape(&config.title),
        html_escape(&config.subtitle),
        items,
        footer
    );

    page_shell(config, &config.title, &body)
}

/// Render a full post page with reading time and localized date
pub fn post_page_html(config: &SiteConfig, post: &Post) -> String {
    let minutes = readtime::estimate(&post.data.content);

    let banner = post
        .data
        .banner
        .as_ref()
        .filter(|b| !b.url.is_empty())
        .map(|b| {
            format!(
                r#"<img class="banner" src="{}" alt="{}">"#,
                html_escape(&b.url),
                html_escape(&post.data.title)
            )
        })
        .unwrap_or_default();

    let date = post
        .first_publication_date
        .map(|d| time_tag(&d, &config.language))
        .unwrap_or_default();

    let body = format!(
        "{}\n<article>\n<h1>{}</h1>\n<div class=\"info\">{} <span>{}</span> <span>{} min</span></div>\n{}</article>",
        banner,
        html_escape(&post.data.title),
        date,
        html_escape(&post.data.author),
        minutes,
        render::render_blocks(&post.data.content)
    );

    page_shell(config, &post.data.title, &body)
}

/// One listing entry: title link, subtitle, teaser, date and author
fn listing_item(config: &SiteConfig, post: &Post) -> String {
    let date = post
        .first_publication_date
        .map(|d| time_tag(&d, &config.language))
        .unwrap_or_default();

    format!(
        "<article>\n<h2><a href=\"{}\">{}</a></h2>\n<p>{}</p>\n<p>{}</p>\n<div class=\"info\">{} <span>{}</span></div>\n</article>\n",
        url_for(config, &format!("post/{}/", post.slug)),
        html_escape(&post.data.title),
        html_escape(&post.data.subtitle),
        html_escape(&render::excerpt(&post.data.content, EXCERPT_LENGTH)),
        date,
        html_escape(&post.data.author)
    )
}

/// Previous/next links between chunked index pages
fn pager_html(config: &SiteConfig, page_num: usize, total: usize) -> String {
    let mut links = Vec::new();

    if page_num > 1 {
        let href = if page_num == 2 {
            url_for(config, "")
        } else {
            url_for(config, &format!("page/{}/", page_num - 1))
        };
        links.push(format!(r#"<a class="prev" href="{}">Newer posts</a>"#, href));
    }
    if page_num < total {
        links.push(format!(
            r#"<a class="next" href="{}">Older posts</a>"#,
            url_for(config, &format!("page/{}/", page_num + 1))
        ));
    }

    if links.is_empty() {
        String::new()
    } else {
        format!("<nav class=\"pager\">{}</nav>", links.join(" "))
    }
}

/// Minimal document shell around a page body
fn page_shell(config: &SiteConfig, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{} | {}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        html_escape(&config.language),
        html_escape(title),
        html_escape(&config.title),
        body
    )
}

/// Prefix a site-relative path with the configured root
fn url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}/{}", config.root.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBlock, PostData, Span};
    use chrono::{TimeZone, Utc};

    fn test_post(slug: &str, title: &str) -> Post {
        Post {
            slug: slug.to_string(),
            first_publication_date: Some(Utc.with_ymd_and_hms(2021, 3, 15, 12, 0, 0).unwrap()),
            data: PostData {
                title: title.to_string(),
                subtitle: "A subtitle".to_string(),
                author: "Jo Writer".to_string(),
                banner: None,
                content: vec![ContentBlock {
                    heading: "Section".to_string(),
                    body: vec![Span {
                        text: "Some words to read here.".to_string(),
                        ..Span::default()
                    }],
                }],
            },
        }
    }

    fn test_app(dir: &std::path::Path, page_size: usize) -> Starlog {
        let mut config = SiteConfig::default();
        config.page_size = page_size;
        Starlog {
            config,
            base_dir: dir.to_path_buf(),
            public_dir: dir.join("public"),
        }
    }

    #[test]
    fn test_generate_writes_index_and_post_pages() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 20);
        let posts = vec![test_post("first-post", "First Post")];

        Generator::new(&app).generate(&posts).unwrap();

        let index = fs::read_to_string(app.public_dir.join("index.html")).unwrap();
        assert!(index.contains("First Post"));
        assert!(index.contains("post/first-post/"));

        let page = fs::read_to_string(
            app.public_dir
                .join("post")
                .join("first-post")
                .join("index.html"),
        )
        .unwrap();
        assert!(page.contains("<h1>First Post</h1>"));
        assert!(page.contains("1 min"));
        assert!(page.contains("March 15, 2021"));
    }

    #[test]
    fn test_generate_chunks_index_pages() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 2);
        let posts = vec![
            test_post("one", "One"),
            test_post("two", "Two"),
            test_post("three", "Three"),
        ];

        Generator::new(&app).generate(&posts).unwrap();

        let first = fs::read_to_string(app.public_dir.join("index.html")).unwrap();
        let second =
            fs::read_to_string(app.public_dir.join("page").join("2").join("index.html")).unwrap();

        // Fetch order preserved across chunks, older posts on later pages
        assert!(first.contains("One") && first.contains("Two"));
        assert!(!first.contains("Three"));
        assert!(second.contains("Three"));
        assert!(second.contains("Newer posts"));
        assert!(first.contains("Older posts"));
    }

    #[test]
    fn test_generate_empty_listing_still_writes_index() {
        let tmp = tempfile::tempdir().unwrap();
        let app = test_app(tmp.path(), 20);

        Generator::new(&app).generate(&[]).unwrap();

        let index = fs::read_to_string(app.public_dir.join("index.html")).unwrap();
        assert!(index.contains("<main id=\"posts\">"));
    }

    #[test]
    fn test_post_page_escapes_markup() {
        let config = SiteConfig::default();
        let mut post = test_post("esc", "Generics <T>");
        post.data.content[0].body[0].text = "a < b".to_string();

        let html = post_page_html(&config, &post);
        assert!(html.contains("Generics &lt;T&gt;"));
        assert!(html.contains("a &lt; b"));
    }
}
