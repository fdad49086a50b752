//! Estimated reading time for structured rich-text content

use crate::content::ContentBlock;

/// Assumed reading speed, words per minute
const WORDS_PER_MINUTE: usize = 200;

/// Estimate reading time in whole minutes for a post body.
///
/// Every block heading and every span text is split on runs of
/// whitespace and the tokens are summed; whitespace-only strings
/// contribute nothing. The total is divided by 200 words per minute and
/// rounded up, so any non-empty content yields at least one minute and
/// only empty content yields zero.
pub fn estimate(content: &[ContentBlock]) -> u32 {
    let words: usize = content
        .iter()
        .map(|block| {
            let heading_words = block.heading.split_whitespace().count();
            let body_words: usize = block
                .body
                .iter()
                .map(|span| span.text.split_whitespace().count())
                .sum();
            heading_words + body_words
        })
        .sum();

    words.div_ceil(WORDS_PER_MINUTE) as u32
}
