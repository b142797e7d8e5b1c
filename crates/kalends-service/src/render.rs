//! Rendering of rich text titles and descriptions for display.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

/// Turns stored rich text into display text.
pub trait Renderer: Send + Sync {
    fn render(&self, text: &str) -> String;
}

/// Strips inline wiki markup, keeping the visible text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

#[expect(clippy::expect_used, reason = "patterns are literals")]
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("valid markup pattern")
}

static LINK: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\[\[(?:([^\]]*?)>>)?([^\]]*?)\]\]"));

static INLINE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\*\*(.+?)\*\*",
        r"__(.+?)__",
        r"--(.+?)--",
        r"##(.+?)##",
    ]
    .into_iter()
    .map(pattern)
    .collect()
});

// Italics, except `//` right after a colon as in `https://`.
static ITALIC: LazyLock<Regex> = LazyLock::new(|| pattern(r"(^|[^:])//(.*?[^:])//"));

impl Renderer for PlainTextRenderer {
    fn render(&self, text: &str) -> String {
        let mut rendered = LINK.replace_all(text, |caps: &Captures<'_>| {
            caps.get(1)
                .filter(|label| !label.as_str().trim().is_empty())
                .or_else(|| caps.get(2))
                .map_or_else(String::new, |m| m.as_str().to_owned())
        })
        .into_owned();

        rendered = ITALIC.replace_all(&rendered, "$1$2").into_owned();
        for markup in INLINE.iter() {
            rendered = markup.replace_all(&rendered, "$1").into_owned();
        }

        rendered.trim().to_owned()
    }
}

/// Returns text unchanged apart from surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimRenderer;

impl Renderer for VerbatimRenderer {
    fn render(&self, text: &str) -> String {
        text.trim().to_owned()
    }
}
