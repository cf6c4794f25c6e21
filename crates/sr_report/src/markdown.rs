//! crates/sr_report/src/markdown.rs
//! Markdown-to-HTML seam. The report model only stores HTML produced here.

/// Converts author-supplied markdown (intro, overview, takeaways) to HTML.
pub trait MarkdownRenderer {
    fn to_html(&self, markdown: &str) -> String;
}

/// Fallback renderer: no markdown syntax, only safe paragraphs.
///
/// Blank lines split paragraphs, single newlines become `<br>`, and every
/// character that is significant in HTML is escaped.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainParagraphs;

impl MarkdownRenderer for PlainParagraphs {
    fn to_html(&self, markdown: &str) -> String {
        let normalized = markdown.replace("\r\n", "\n");
        let mut out = String::new();
        for para in normalized.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            let lines: Vec<String> = para.lines().map(|l| escape_html(l.trim_end())).collect();
            out.push_str("<p>");
            out.push_str(&lines.join("<br>"));
            out.push_str("</p>");
        }
        out
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
