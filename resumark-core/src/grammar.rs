//! Tag grammar shared by the semantic renderer and the editor highlighter.
//!
//! Two families of inline forms exist:
//!
//! - **constructs** with a `{…}` body: `@icon{name}`, `@avatar{url}`,
//!   `@company{name}` / `@company{name|url}` and `@flex{a|b|c|d}`;
//! - **delimited tags**: `!!…!!`, `^^…^^`, `++…++`, `~~…~~`, `` `…` `` and
//!   `**…**`, in that precedence order.
//!
//! Delimited tags match the shortest non-empty span between two occurrences of
//! their delimiter, so `~~a~~ mid ~~b~~` is two spans. Consumers pick the
//! output through a [`TagStrategy`]; the grammar itself never produces HTML.

use once_cell::sync::Lazy;
use regex::Regex;

/// `@icon{name}`
pub static ICON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@icon\{([^{}\n]+)\}").expect("valid icon regex"));

/// `@avatar{url}`
pub static AVATAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@avatar\{([^{}\n]+)\}").expect("valid avatar regex"));

/// `@company{name}` or `@company{name|url}`
pub static COMPANY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@company\{([^|{}\n]+)(?:\|([^{}\n]+))?\}").expect("valid company regex")
});

/// `@flex{a|b|c|d}`; the body may hold nested `@name{…}` constructs
pub static FLEX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@flex\{((?:@[A-Za-z]+\{[^{}\n]*\}|[^{}\n])+)\}").expect("valid flex regex")
});

/// Any construct, used by the highlighter to segment a line
pub static CONSTRUCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"@(?P<name>icon|avatar|company)\{(?P<arg>[^{}\n]*)\}|@flex\{(?P<flex>(?:@[A-Za-z]+\{[^{}\n]*\}|[^{}\n])+)\}",
    )
    .expect("valid construct regex")
});

/// Delimited inline tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `!!text!!`
    Highlight,
    /// `^^text^^`
    AccentA,
    /// `++text++`
    AccentB,
    /// `~~text~~`
    AccentC,
    /// `` `text` ``
    Code,
    /// `**text**`
    Bold,
}

impl TagKind {
    /// Every tag, in precedence order
    pub const ALL: [TagKind; 6] = [
        TagKind::Highlight,
        TagKind::AccentA,
        TagKind::AccentB,
        TagKind::AccentC,
        TagKind::Code,
        TagKind::Bold,
    ];

    /// Tags the CommonMark parser has no syntax for; they are applied to the
    /// text runs it emits.
    pub const ACCENTS: [TagKind; 4] = [
        TagKind::Highlight,
        TagKind::AccentA,
        TagKind::AccentB,
        TagKind::AccentC,
    ];

    /// Tags drawn as a padded badge, which widens a flex cell
    pub const DECORATED: [TagKind; 5] = [
        TagKind::Highlight,
        TagKind::AccentA,
        TagKind::AccentB,
        TagKind::AccentC,
        TagKind::Code,
    ];

    pub fn delimiter(self) -> &'static str {
        match self {
            TagKind::Highlight => "!!",
            TagKind::AccentA => "^^",
            TagKind::AccentB => "++",
            TagKind::AccentC => "~~",
            TagKind::Code => "`",
            TagKind::Bold => "**",
        }
    }
}

/// Byte range of one delimited tag, delimiters included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch {
    pub kind: TagKind,
    pub start: usize,
    pub end: usize,
}

impl TagMatch {
    /// Text between the delimiters
    pub fn inner<'t>(&self, text: &'t str) -> &'t str {
        let width = self.kind.delimiter().len();
        &text[self.start + width..self.end - width]
    }
}

/// Find the leftmost shortest span of `kind` in `text`.
///
/// An empty span (`~~~~`) is not a tag; its closing delimiter may still open
/// the next span. Unterminated delimiters never match.
pub fn find_tag(text: &str, kind: TagKind) -> Option<TagMatch> {
    let delim = kind.delimiter();
    let mut from = 0;

    while let Some(rel) = text[from..].find(delim) {
        let open = from + rel;
        let body_start = open + delim.len();
        let close = body_start + text[body_start..].find(delim)?;
        if close > body_start {
            return Some(TagMatch {
                kind,
                start: open,
                end: close + delim.len(),
            });
        }
        from = close;
    }

    None
}

/// All non-overlapping spans of `kind`, left to right
pub fn find_tags(text: &str, kind: TagKind) -> Vec<TagMatch> {
    let mut matches = Vec::new();
    let mut offset = 0;

    while let Some(found) = find_tag(&text[offset..], kind) {
        let absolute = TagMatch {
            kind,
            start: offset + found.start,
            end: offset + found.end,
        };
        offset = absolute.end;
        matches.push(absolute);
    }

    matches
}

/// Whether any of `kinds` occurs in `text`
pub fn contains_tag(text: &str, kinds: &[TagKind]) -> bool {
    kinds.iter().any(|kind| find_tag(text, *kind).is_some())
}

/// Output side of the grammar.
///
/// The renderer emits semantic elements, the highlighter emits marker spans;
/// both walk the same matches.
pub trait TagStrategy {
    /// Write a run of text that holds no tag.
    fn text(&self, out: &mut String, text: &str) {
        out.push_str(text);
    }

    /// Write a tag whose inner content has already been written by this
    /// strategy.
    fn tag(&self, out: &mut String, kind: TagKind, inner: &str);
}

/// Apply `kinds` (in precedence order) to `text` through `strategy`.
///
/// The highest-precedence tag present is matched first; lower tags are then
/// matched separately before, inside and after it, so spans always nest.
pub fn apply_tags<S: TagStrategy + ?Sized>(text: &str, kinds: &[TagKind], strategy: &S) -> String {
    let mut out = String::with_capacity(text.len());
    write_tags(&mut out, text, kinds, strategy);
    out
}

fn write_tags<S: TagStrategy + ?Sized>(
    out: &mut String,
    text: &str,
    kinds: &[TagKind],
    strategy: &S,
) {
    if text.is_empty() {
        return;
    }

    for (idx, kind) in kinds.iter().enumerate() {
        if let Some(found) = find_tag(text, *kind) {
            write_tags(out, &text[..found.start], &kinds[idx..], strategy);

            let mut inner = String::new();
            write_tags(&mut inner, found.inner(text), &kinds[idx + 1..], strategy);
            strategy.tag(out, *kind, &inner);

            write_tags(out, &text[found.end..], &kinds[idx..], strategy);
            return;
        }
    }

    strategy.text(out, text);
}

/// Strategy that drops delimiters and keeps the content
pub struct PlainTags;

impl TagStrategy for PlainTags {
    fn tag(&self, out: &mut String, _kind: TagKind, inner: &str) {
        out.push_str(inner);
    }
}

/// Split a flex body on pipes that are not inside a nested `{…}` construct.
pub fn split_cells(body: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                cells.push(body[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    cells.push(body[start..].trim());

    cells
}

/// Whether a split flex row is a four-cell row with both middle cells empty
pub fn is_collapsed(cells: &[&str]) -> bool {
    cells.len() == 4 && cells[1].is_empty() && cells[2].is_empty()
}

/// Line-level block prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPrefix {
    /// `# `, `## ` or `### `
    Heading(u8),
    /// `> `
    Quote,
    /// `- `
    ListItem,
}

impl BlockPrefix {
    /// Detect the prefix of a raw source line.
    ///
    /// Returns the prefix and its byte length.
    pub fn detect(line: &str) -> Option<(BlockPrefix, usize)> {
        for level in (1..=3u8).rev() {
            let marker = "#".repeat(level as usize);
            if line.starts_with(&marker) && line[marker.len()..].starts_with(' ') {
                return Some((BlockPrefix::Heading(level), marker.len() + 1));
            }
        }
        if line.starts_with("> ") {
            return Some((BlockPrefix::Quote, 2));
        }
        if line.starts_with("- ") {
            return Some((BlockPrefix::ListItem, 2));
        }
        None
    }
}

/// Lines whose block is synthesized during preprocessing instead of by the
/// CommonMark parser
pub fn opens_construct(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("@flex") || trimmed.starts_with("@avatar")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Brackets;

    impl TagStrategy for Brackets {
        fn tag(&self, out: &mut String, kind: TagKind, inner: &str) {
            out.push_str(&format!("[{:?}:{}]", kind, inner));
        }
    }

    #[test]
    fn test_same_delimiter_tags_do_not_merge() {
        let text = "~~a~~ mid ~~b~~";
        let found = find_tags(text, TagKind::AccentC);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].inner(text), "a");
        assert_eq!(found[1].inner(text), "b");
    }

    #[test]
    fn test_unterminated_delimiter_stays_literal() {
        assert_eq!(find_tag("~~open only", TagKind::AccentC), None);
        assert_eq!(apply_tags("**half", &TagKind::ALL, &Brackets), "**half");
    }

    #[test]
    fn test_empty_span_is_skipped() {
        let text = "~~~~x~~";
        let found = find_tag(text, TagKind::AccentC).unwrap();
        assert_eq!(found.start, 2);
        assert_eq!(found.inner(text), "x");
    }

    #[test]
    fn test_precedence_nests_lower_tags() {
        let out = apply_tags("!!a **b**!! and `c`", &TagKind::ALL, &Brackets);
        assert_eq!(out, "[Highlight:a [Bold:b]] and [Code:c]");
    }

    #[test]
    fn test_plain_tags_strip_delimiters() {
        let out = apply_tags("^^x^^ ++y++ **z**", &TagKind::ALL, &PlainTags);
        assert_eq!(out, "x y z");
    }

    #[test]
    fn test_split_cells_respects_nested_constructs() {
        let cells = split_cells("@company{Acme|https://a.io/x.png} | **Dev** |  | 2024");
        assert_eq!(
            cells,
            vec!["@company{Acme|https://a.io/x.png}", "**Dev**", "", "2024"]
        );
        assert!(is_collapsed(&["a", "", "", "d"]));
        assert!(!is_collapsed(&["a", "b", "", "d"]));
        assert!(!is_collapsed(&["a", "", ""]));
    }

    #[test]
    fn test_flex_regex_allows_nested_company() {
        let line = "@flex{@company{Acme|https://a.io} | b | c | d}";
        let caps = FLEX_RE.captures(line).unwrap();
        assert_eq!(&caps[1], "@company{Acme|https://a.io} | b | c | d");
    }

    #[test]
    fn test_block_prefix_detection() {
        assert_eq!(
            BlockPrefix::detect("## Work"),
            Some((BlockPrefix::Heading(2), 3))
        );
        assert_eq!(
            BlockPrefix::detect("### Deep"),
            Some((BlockPrefix::Heading(3), 4))
        );
        assert_eq!(BlockPrefix::detect("> quote"), Some((BlockPrefix::Quote, 2)));
        assert_eq!(BlockPrefix::detect("- item"), Some((BlockPrefix::ListItem, 2)));
        assert_eq!(BlockPrefix::detect("#nospace"), None);
        assert_eq!(BlockPrefix::detect("#### four"), None);
    }

    #[test]
    fn test_opens_construct() {
        assert!(opens_construct("  @flex{a|b|c|d}"));
        assert!(opens_construct("@avatar{/me.jpg}"));
        assert!(!opens_construct("- @flex{a|b|c|d}"));
    }
}
