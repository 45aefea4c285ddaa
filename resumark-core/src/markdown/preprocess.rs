//! Line-preserving substitution of the `@name{…}` constructs and the accent
//! tags.
//!
//! Every replacement stays on the line it came from, so byte offsets reported
//! by the CommonMark parser still map to the author's line numbers. Lines of
//! fenced code blocks are left untouched.

use super::tags::{apply_accents, html_escape, SemanticTags};
use crate::catalog::Catalog;
use crate::columns::ColumnWidthSolver;
use crate::config::LayoutConfig;
use crate::grammar::{
    apply_tags, is_collapsed, opens_construct, split_cells, TagKind, AVATAR_RE, COMPANY_RE,
    FLEX_RE, ICON_RE,
};
use regex::Captures;
use resumark_types::ColumnWidthPlan;
use std::collections::HashSet;
use std::ops::Range;

/// Stand-in for an uploaded avatar, substituted after block rendering
pub const AVATAR_PLACEHOLDER: &str = "__AVATAR_SRC__";

/// Output of preprocessing
#[derive(Debug, Clone)]
pub struct Prepared {
    /// Source with constructs replaced; same line count as the input
    pub text: String,
    /// 1-based lines opening a flex row or avatar; these never carry
    /// parser-derived provenance
    pub exempt_lines: HashSet<usize>,
    pub column_widths: ColumnWidthPlan,
}

impl Prepared {
    /// Byte ranges of `text` to parse separately.
    ///
    /// Each construct line stands alone, so the HTML block it becomes ends
    /// with the line instead of swallowing the lines below it.
    pub fn segments(&self) -> Vec<Range<usize>> {
        let mut segments = Vec::new();
        let mut start = 0;
        let mut offset = 0;

        for (idx, line) in self.text.split('\n').enumerate() {
            let end = (offset + line.len() + 1).min(self.text.len());
            if self.exempt_lines.contains(&(idx + 1)) {
                if offset > start {
                    segments.push(start..offset);
                }
                segments.push(offset..end);
                start = end;
            }
            offset = end;
        }

        if start < self.text.len() {
            segments.push(start..self.text.len());
        }
        segments
    }
}

/// Tracks fenced code blocks across lines
#[derive(Default)]
struct Fences {
    /// Fence character and length of the open block
    open: Option<(u8, usize)>,
}

impl Fences {
    /// Whether `line` belongs to a code block, fences included
    fn is_code(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start_matches(' ');
        let marker = trimmed
            .bytes()
            .next()
            .filter(|b| *b == b'`' || *b == b'~');
        let run = marker.map_or(0, |m| trimmed.bytes().take_while(|b| *b == m).count());

        match (self.open, marker) {
            (Some((ch, len)), Some(m)) if m == ch && run >= len => {
                if trimmed[run..].trim().is_empty() {
                    self.open = None;
                }
                true
            }
            (Some(_), _) => true,
            (None, Some(m)) if run >= 3 && line.len() - trimmed.len() < 4 => {
                self.open = Some((m, run));
                true
            }
            (None, _) => false,
        }
    }
}

pub struct Preprocessor<'a> {
    catalog: &'a Catalog,
    layout: &'a LayoutConfig,
}

impl<'a> Preprocessor<'a> {
    pub fn new(catalog: &'a Catalog, layout: &'a LayoutConfig) -> Self {
        Self { catalog, layout }
    }

    pub fn run(&self, source: &str, avatar_override: Option<&str>) -> Prepared {
        let mut exempt_lines = HashSet::new();
        let mut fences = Fences::default();

        // (line, is code)
        let staged: Vec<(String, bool)> = source
            .split('\n')
            .enumerate()
            .map(|(idx, line)| {
                if fences.is_code(line) {
                    return (line.to_string(), true);
                }
                if opens_construct(line) {
                    exempt_lines.insert(idx + 1);
                }
                let line = self.replace_icons(line);
                let line = self.replace_avatar(&line, avatar_override);
                (self.replace_companies(&line), false)
            })
            .collect();

        // Widths are shared by every row, so they are solved on the whole text.
        let prose: Vec<&str> = staged
            .iter()
            .filter(|(_, code)| !code)
            .map(|(line, _)| line.as_str())
            .collect();
        let column_widths =
            ColumnWidthSolver::new(self.layout, self.catalog).solve(&prose.join("\n"));

        let text = staged
            .iter()
            .enumerate()
            .map(|(idx, (line, code))| {
                if *code {
                    return line.clone();
                }
                let line_no = idx + 1;
                let stamp = exempt_lines.contains(&line_no).then_some(line_no);
                apply_accents(&replace_flex(line, stamp, column_widths))
            })
            .collect::<Vec<_>>()
            .join("\n");

        Prepared {
            text,
            exempt_lines,
            column_widths,
        }
    }

    fn replace_icons(&self, line: &str) -> String {
        ICON_RE
            .replace_all(line, |caps: &Captures| match self.catalog.icon(&caps[1]) {
                Some(svg) => format!(r#"<span class="resume-icon">{}</span>"#, svg),
                None => {
                    tracing::warn!("Unknown icon: {}", caps[1].trim());
                    String::new()
                }
            })
            .into_owned()
    }

    fn replace_avatar(&self, line: &str, avatar_override: Option<&str>) -> String {
        AVATAR_RE
            .replace_all(line, |caps: &Captures| {
                let src = caps[1].trim();
                let remote = src.starts_with("http://") || src.starts_with("https://");
                let src = if avatar_override.is_some() && !remote {
                    AVATAR_PLACEHOLDER.to_string()
                } else {
                    html_escape(src)
                };
                format!(r#"<img class="resume-avatar" src="{}" alt="avatar" />"#, src)
            })
            .into_owned()
    }

    fn replace_companies(&self, line: &str) -> String {
        COMPANY_RE
            .replace_all(line, |caps: &Captures| {
                let name = caps[1].trim();
                let logo = caps
                    .get(2)
                    .map(|m| m.as_str().trim())
                    .filter(|url| !url.is_empty())
                    .or_else(|| self.catalog.company_logo(name));

                match logo {
                    Some(logo) => format!(
                        r#"<span class="company-badge"><img class="company-icon" src="{}" alt="{}" onerror="this.style.display='none'" /><strong>{}</strong></span>"#,
                        html_escape(logo),
                        html_escape(name),
                        html_escape(name)
                    ),
                    None => format!("<strong>{}</strong>", html_escape(name)),
                }
            })
            .into_owned()
    }
}

/// Replace the flex rows of one line.
///
/// On a line that opens with a flex row, the first row is stamped with
/// `stamp`; elsewhere the enclosing block carries the line.
fn replace_flex(line: &str, stamp: Option<usize>, widths: ColumnWidthPlan) -> String {
    let mut stamp = stamp;

    FLEX_RE
        .replace_all(line, |caps: &Captures| {
            let cells = split_cells(&caps[1]);
            let collapsed = is_collapsed(&cells);
            let sized = cells.len() == 4 && !collapsed;

            let mut html = String::from(r#"<div class="flex-layout"#);
            if collapsed {
                html.push_str(" flex-layout--collapsed");
            }
            match stamp.take() {
                Some(line_no) => html.push_str(&format!(
                    r#" clickable-section" data-line="{}">"#,
                    line_no
                )),
                None => html.push_str(r#"">"#),
            }

            for (column, cell) in cells.iter().enumerate() {
                let content = apply_tags(cell, &TagKind::ALL, &SemanticTags);
                match widths.get(column).filter(|_| sized) {
                    Some(percent) => html.push_str(&format!(
                        r#"<div class="flex-item" style="flex: 0 0 {}%">{}</div>"#,
                        percent, content
                    )),
                    None => html.push_str(&format!(r#"<div class="flex-item">{}</div>"#, content)),
                }
            }

            html.push_str("</div>");
            html
        })
        .into_owned()
}
