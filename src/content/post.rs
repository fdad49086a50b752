//! Post data model, mirroring the content source's wire JSON

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of rich text: plain text plus inline formatting ranges.
///
/// The formatting is opaque to word counting; only the renderer
/// interprets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Span {
    /// Plain text content
    #[serde(default)]
    pub text: String,

    /// Block-level kind tag (paragraph, heading3, preformatted, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Inline formatting ranges over `text`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<InlineSpan>,
}

/// An inline formatting range inside a span's text (character offsets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineSpan {
    pub start: usize,
    pub end: usize,

    /// Formatting kind (strong, em, hyperlink, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Extra payload, e.g. the target of a hyperlink
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A titled section of a post body.
///
/// The source may omit either field; a missing heading or body
/// deserializes to its empty form instead of failing the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub heading: String,

    #[serde(default)]
    pub body: Vec<Span>,
}

/// Banner image metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub url: String,
}

/// The editable fields of a post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostData {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,

    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A blog post document from the content source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    /// Unique URL-friendly identifier (`uid` on the wire)
    #[serde(rename = "uid", default)]
    pub slug: String,

    /// First publication timestamp, absent for unpublished previews
    #[serde(default)]
    pub first_publication_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub data: PostData,
}

/// One page of query results plus the cursor for the following page.
///
/// `next_page` absent or empty means no further pages exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPage {
    #[serde(default)]
    pub next_page: Option<String>,

    #[serde(default)]
    pub results: Vec<Post>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_page() {
        let json = r#"{
            "next_page": "https://cms.example.com/api/v2/documents/search?page=2",
            "results": [
                {
                    "uid": "using-hooks",
                    "first_publication_date": "2021-03-15T19:25:28+00:00",
                    "data": {
                        "title": "Using Hooks",
                        "subtitle": "Thinking in synchronization",
                        "author": "Joseph Oliveira",
                        "banner": { "url": "https://images.example.com/banner.png" },
                        "content": [
                            {
                                "heading": "Getting started",
                                "body": [
                                    { "type": "paragraph", "text": "Hello world", "spans": [] }
                                ]
                            }
                        ]
                    }
                }
            ]
        }"#;

        let page: PostPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.next_page.is_some());

        let post = &page.results[0];
        assert_eq!(post.slug, "using-hooks");
        assert_eq!(post.data.title, "Using Hooks");
        assert_eq!(post.data.content[0].heading, "Getting started");
        assert_eq!(post.data.content[0].body[0].text, "Hello world");
        assert!(post.first_publication_date.is_some());
    }

    #[test]
    fn test_missing_fields_default() {
        // Blocks without a body (or heading) must still parse
        let json = r#"{
            "uid": "sparse",
            "data": {
                "title": "Sparse",
                "content": [
                    { "heading": "Only a heading" },
                    { "body": [ { "text": "no type tag" } ] }
                ]
            }
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.first_publication_date.is_none());
        assert!(post.data.content[0].body.is_empty());
        assert_eq!(post.data.content[1].heading, "");
        assert!(post.data.content[1].body[0].kind.is_none());
    }

    #[test]
    fn test_inline_span_data() {
        let json = r#"{
            "text": "read the docs",
            "type": "paragraph",
            "spans": [
                { "start": 9, "end": 13, "type": "hyperlink", "data": { "url": "https://example.com" } }
            ]
        }"#;

        let span: Span = serde_json::from_str(json).unwrap();
        assert_eq!(span.spans.len(), 1);
        assert_eq!(span.spans[0].kind, "hyperlink");
    }
}
