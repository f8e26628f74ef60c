/*
 * markdown.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Lanterna, a Gemini protocol client library.
 *
 * Lanterna is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Lanterna is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Lanterna.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Markdown projection of a parsed document.

use crate::gemtext::node::Node;
use crate::gemtext::parser::Document;

/// Markdown rendering options.
#[derive(Debug, Clone)]
pub struct MarkdownRenderOptions {
    /// Carry fence alt-text as the info string (backticks stripped).
    pub include_alt_text: bool,
    /// Emit a closing fence when the document ends inside a preformatted
    /// block.
    pub close_trailing_fence: bool,
}

impl Default for MarkdownRenderOptions {
    fn default() -> Self {
        Self {
            include_alt_text: true,
            close_trailing_fence: true,
        }
    }
}

/// Escape backslashes and brackets in a link label.
fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if matches!(c, '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Render a document to Markdown. Preformatted lines pass through their raw
/// source unescaped.
pub fn render_markdown(document: &Document, options: &MarkdownRenderOptions) -> String {
    let mut out = String::new();
    let mut in_fence = false;
    for node in &document.nodes {
        let line = match node {
            Node::Text { raw, text, preformatted, .. } => {
                if *preformatted {
                    raw.clone()
                } else {
                    text.clone()
                }
            }
            Node::Link { target, label, .. } => match label {
                Some(label) => format!("[{}]({})", escape_label(label), target),
                None => format!("<{}>", target),
            },
            Node::Heading { level, text, .. } => {
                format!("{} {}", "#".repeat(*level as usize), text)
            }
            Node::ListItem { text, .. } => format!("- {}", text),
            Node::Quote { text, .. } => format!("> {}", text),
            Node::PreformatToggle { alt, entering, .. } => {
                in_fence = *entering;
                if *entering && options.include_alt_text && !alt.is_empty() {
                    format!("```{}", alt.replace('`', ""))
                } else {
                    "```".to_string()
                }
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    if in_fence && options.close_trailing_fence {
        out.push_str("```\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemtext::parser::{parse, ParseOptions};

    fn doc(source: &str) -> Document {
        parse(source, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn renders_each_kind() {
        let d = doc("plain\n# One\n## Two\n* item\n>quote\n");
        let out = render_markdown(&d, &MarkdownRenderOptions::default());
        assert_eq!(out, "plain\n# One\n## Two\n- item\n> quote\n");
    }

    #[test]
    fn labelled_link_is_bracketed() {
        let d = doc("=> gemini://example.org/ Example site\n");
        let out = render_markdown(&d, &MarkdownRenderOptions::default());
        assert_eq!(out, "[Example site](gemini://example.org/)\n");
    }

    #[test]
    fn bare_link_is_angle_bracketed() {
        let d = doc("=> gemini://example.org/\n");
        let out = render_markdown(&d, &MarkdownRenderOptions::default());
        assert_eq!(out, "<gemini://example.org/>\n");
    }

    #[test]
    fn label_brackets_are_escaped() {
        let d = doc("=> gemini://example.org/ a [b] c\\d\n");
        let out = render_markdown(&d, &MarkdownRenderOptions::default());
        assert_eq!(out, "[a \\[b\\] c\\\\d](gemini://example.org/)\n");
    }

    #[test]
    fn fence_carries_stripped_alt_text() {
        let d = doc("```py`thon\ncode\n```\n");
        let out = render_markdown(&d, &MarkdownRenderOptions::default());
        assert_eq!(out, "```python\ncode\n```\n");
    }

    #[test]
    fn alt_text_can_be_dropped() {
        let d = doc("```python\ncode\n```\n");
        let options = MarkdownRenderOptions {
            include_alt_text: false,
            ..MarkdownRenderOptions::default()
        };
        let out = render_markdown(&d, &options);
        assert_eq!(out, "```\ncode\n```\n");
    }

    #[test]
    fn preformatted_lines_pass_through_raw() {
        let d = doc("```\n# raw [stuff]\n```\n");
        let out = render_markdown(&d, &MarkdownRenderOptions::default());
        assert_eq!(out, "```\n# raw [stuff]\n```\n");
    }

    #[test]
    fn trailing_fence_auto_closed() {
        let d = doc("```\ncode\n");
        let closed = render_markdown(&d, &MarkdownRenderOptions::default());
        assert_eq!(closed, "```\ncode\n```\n");
        let options = MarkdownRenderOptions {
            close_trailing_fence: false,
            ..MarkdownRenderOptions::default()
        };
        assert_eq!(render_markdown(&d, &options), "```\ncode\n");
    }
}
