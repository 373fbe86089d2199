//! HTML tag stripping.
//!
//! When a chunker is configured to strip HTML, token counts are taken on the
//! stripped text and the emitted chunks carry stripped content. Matching and
//! cutting still happen on the tagged text so byte offsets stay valid.

use regex::Regex;

/// Reduces markup to plain text.
///
/// Must be total (never fail) and deterministic.
pub trait TagStripper: Send + Sync {
    /// Remove markup from `text`, keeping its textual content.
    fn strip(&self, text: &str) -> String;
}

/// A regex-based stripper.
///
/// Drops `<script>` and `<style>` blocks and comments, removes the remaining
/// tags, then decodes character references (named HTML5 entities and
/// numeric references). Not an HTML parser: malformed markup passes through
/// as text.
///
/// ```rust
/// use midsplit::{RegexTagStripper, TagStripper};
///
/// let stripper = RegexTagStripper::new();
/// assert_eq!(stripper.strip("<p>Fish &amp; chips</p>"), "Fish & chips");
/// ```
#[derive(Debug, Clone)]
pub struct RegexTagStripper {
    blocks: Regex,
    tags: Regex,
}

impl RegexTagStripper {
    /// Create a stripper.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: Regex::new(
                r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<!--.*?-->",
            )
            .expect("valid block regex"),
            tags: Regex::new(r"</?[A-Za-z][^>]*>|<![^>]*>").expect("valid tag regex"),
        }
    }
}

impl Default for RegexTagStripper {
    fn default() -> Self {
        Self::new()
    }
}

impl TagStripper for RegexTagStripper {
    fn strip(&self, text: &str) -> String {
        if !text.contains(['<', '&']) {
            return text.to_string();
        }
        let without_blocks = self.blocks.replace_all(text, "");
        let without_tags = self.tags.replace_all(&without_blocks, "");
        html_escape::decode_html_entities(&without_tags).into_owned()
    }
}

#[cfg(feature = "html")]
pub use self::render::Html2TextStripper;

#[cfg(feature = "html")]
mod render {
    use std::io::Cursor;

    use html2text::render::TrivialDecorator;

    use super::{RegexTagStripper, TagStripper};

    /// Renders HTML to plain text with `html2text`.
    ///
    /// Uses the undecorated renderer: no link footnotes, list bullets or
    /// emphasis markers are added to the text. Falls back to [`RegexTagStripper`] if rendering fails.
    #[derive(Debug, Clone)]
    pub struct Html2TextStripper {
        width: usize,
        fallback: RegexTagStripper,
    }

    impl Html2TextStripper {
        /// Create a stripper that wraps output at `width` columns.
        #[must_use]
        pub fn new(width: usize) -> Self {
            Self {
                width: width.max(1),
                fallback: RegexTagStripper::new(),
            }
        }
    }

    impl Default for Html2TextStripper {
        fn default() -> Self {
            // Wide enough that wrapping rarely inserts line breaks.
            Self::new(10_000)
        }
    }

    impl TagStripper for Html2TextStripper {
        fn strip(&self, text: &str) -> String {
            let input = Cursor::new(text.as_bytes());
            html2text::from_read_with_decorator(input, self.width, TrivialDecorator::new())
                .map(|s| s.trim_end().to_string())
                .unwrap_or_else(|_| self.fallback.strip(text))
        }
    }
}
