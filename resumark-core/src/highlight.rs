//! Source highlighting for the live editor.
//!
//! The output mirrors the source character for character (escaped), wrapped
//! in `hl-*` spans. It is laid over a transparent textarea, so no markup
//! character may be added or dropped.

use crate::grammar::{apply_tags, BlockPrefix, TagKind, TagStrategy, CONSTRUCT_RE};

/// Tag strategy that keeps delimiters visible inside marker spans
pub struct DecoratedTags;

impl TagStrategy for DecoratedTags {
    fn text(&self, out: &mut String, text: &str) {
        out.push_str(&escape(text));
    }

    fn tag(&self, out: &mut String, kind: TagKind, inner: &str) {
        let (class, marker_class) = match kind {
            TagKind::Highlight => ("hl-tag-highlight", "hl-tag-marker"),
            TagKind::AccentA => ("hl-tag-purple", "hl-tag-marker"),
            TagKind::AccentB => ("hl-tag-green", "hl-tag-marker"),
            TagKind::AccentC => ("hl-tag-red", "hl-tag-marker"),
            TagKind::Code => ("hl-tag-code", "hl-tag-marker"),
            TagKind::Bold => ("hl-bold", "hl-bold-marker"),
        };
        let marker = format!(
            r#"<span class="{}">{}</span>"#,
            marker_class,
            kind.delimiter()
        );
        out.push_str(&format!(
            r#"<span class="{}">{}{}{}</span>"#,
            class, marker, inner, marker
        ));
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Highlight a whole document, line by line
pub fn highlight(source: &str) -> String {
    source
        .split('\n')
        .map(highlight_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Highlight one source line
pub fn highlight_line(line: &str) -> String {
    if line.trim().is_empty() {
        return line.to_string();
    }

    match BlockPrefix::detect(line) {
        Some((BlockPrefix::Heading(level), len)) => format!(
            r#"<span class="hl-h{}"><span class="hl-heading-marker">{}</span>{}</span>"#,
            level,
            &line[..len],
            highlight_inline(&line[len..])
        ),
        Some((BlockPrefix::Quote, len)) => format!(
            r#"<span class="hl-quote"><span class="hl-quote-marker">&gt; </span>{}</span>"#,
            highlight_inline(&line[len..])
        ),
        Some((BlockPrefix::ListItem, len)) => format!(
            r#"<span class="hl-list-marker">- </span>{}"#,
            highlight_inline(&line[len..])
        ),
        None => highlight_inline(line),
    }
}

/// Highlight constructs and delimited tags in a run of text
pub fn highlight_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut last = 0;

    for caps in CONSTRUCT_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&apply_tags(&text[last..whole.start()], &TagKind::ALL, &DecoratedTags));

        if let Some(body) = caps.name("flex") {
            out.push_str(r#"<span class="hl-flex-keyword">@flex</span>"#);
            out.push_str(r#"<span class="hl-flex-brace">{</span>"#);
            out.push_str(&highlight_inline(body.as_str()));
            out.push_str(r#"<span class="hl-flex-brace">}</span>"#);
        } else {
            out.push_str(&format!(
                r#"<span class="hl-special">{}</span>"#,
                escape(whole.as_str())
            ));
        }

        last = whole.end();
    }

    out.push_str(&apply_tags(&text[last..], &TagKind::ALL, &DecoratedTags));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_before_matching() {
        assert_eq!(highlight("a <b> & c"), "a &lt;b&gt; &amp; c");
    }

    #[test]
    fn test_block_prefixes() {
        assert_eq!(
            highlight("## Work"),
            r#"<span class="hl-h2"><span class="hl-heading-marker">## </span>Work</span>"#
        );
        assert_eq!(
            highlight("> quote"),
            r#"<span class="hl-quote"><span class="hl-quote-marker">&gt; </span>quote</span>"#
        );
        assert_eq!(
            highlight("- item"),
            r#"<span class="hl-list-marker">- </span>item"#
        );
    }

    #[test]
    fn test_blank_lines_unchanged() {
        assert_eq!(highlight("a\n   \nb"), "a\n   \nb");
    }

    #[test]
    fn test_tags_keep_markers() {
        assert_eq!(
            highlight("**b**"),
            r#"<span class="hl-bold"><span class="hl-bold-marker">**</span>b<span class="hl-bold-marker">**</span></span>"#
        );
        let html = highlight("~~a~~ and ~~b~~");
        assert_eq!(html.matches(r#"<span class="hl-tag-red">"#).count(), 2);
    }

    #[test]
    fn test_special_constructs() {
        assert_eq!(
            highlight("@icon{phone} 123"),
            r#"<span class="hl-special">@icon{phone}</span> 123"#
        );
        assert!(highlight("@company{A|https://a.io/x.png}")
            .starts_with(r#"<span class="hl-special">@company{A|https://a.io/x.png}</span>"#));
    }

    #[test]
    fn test_flex_row() {
        let html = highlight("@flex{@company{Acme} | **Dev** | | 2024}");
        assert!(html.starts_with(
            r#"<span class="hl-flex-keyword">@flex</span><span class="hl-flex-brace">{</span><span class="hl-special">@company{Acme}</span> | <span class="hl-bold">"#
        ));
        assert!(html.ends_with(r#" | | 2024<span class="hl-flex-brace">}</span>"#));
    }

    #[test]
    fn test_text_is_preserved() {
        let source = "# Name\n> @icon{user} x | y\n@flex{a|`b`|^^c^^|d}\n- **k**: v <3";
        let html = highlight(source);
        let stripped = regex::Regex::new(r"<[^>]+>")
            .unwrap()
            .replace_all(&html, "")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&");
        assert_eq!(stripped, source);
    }
}
