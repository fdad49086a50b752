//! Content module - post model and the content source client

mod post;
mod source;

pub use post::{Banner, ContentBlock, InlineSpan, Post, PostData, PostPage, Span};
pub use source::{ContentSource, PageFetcher, SourceError};
