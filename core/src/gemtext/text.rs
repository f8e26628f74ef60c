/*
 * text.rs
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

//! Plain-text projection of a parsed document. Loss-tolerant and pure:
//! identical document + options always yield identical output.

use crate::gemtext::node::Node;
use crate::gemtext::parser::Document;

/// Plain-text rendering options.
#[derive(Debug, Clone)]
pub struct TextRenderOptions {
    /// Collapse whitespace runs to single spaces. Never applied to
    /// preformatted text or to the quote marker.
    pub collapse_whitespace: bool,
    /// Render link lines as `label (target)` instead of label alone.
    pub include_link_targets: bool,
    /// Prefix for list items.
    pub bullet: String,
    /// Emit `[alt]` for a fence entry with non-empty alt-text.
    pub include_alt_text: bool,
}

impl Default for TextRenderOptions {
    fn default() -> Self {
        Self {
            collapse_whitespace: false,
            include_link_targets: true,
            bullet: "* ".to_string(),
            include_alt_text: false,
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn shape(text: &str, options: &TextRenderOptions) -> String {
    if options.collapse_whitespace {
        collapse(text)
    } else {
        text.to_string()
    }
}

/// Render a document to plain text, one output line per contributing node.
/// Fence exits, and fence entries without emitted alt-text, contribute
/// nothing.
pub fn render_text(document: &Document, options: &TextRenderOptions) -> String {
    let mut out = String::new();
    for node in &document.nodes {
        let line = match node {
            Node::Text { text, preformatted, .. } => {
                if *preformatted {
                    text.clone()
                } else {
                    shape(text, options)
                }
            }
            Node::Link { target, label, .. } => match label {
                Some(label) => {
                    if options.include_link_targets {
                        format!("{} ({})", shape(label, options), target)
                    } else {
                        shape(label, options)
                    }
                }
                None => target.clone(),
            },
            Node::Heading { text, .. } => shape(text, options),
            Node::ListItem { text, .. } => format!("{}{}", options.bullet, shape(text, options)),
            Node::Quote { text, .. } => format!(">{}", shape(text, options)),
            Node::PreformatToggle { alt, entering, .. } => {
                if *entering && options.include_alt_text && !alt.is_empty() {
                    format!("[{}]", alt)
                } else {
                    continue;
                }
            }
        };
        out.push_str(&line);
        out.push('\n');
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
        let d = doc("plain\n=> gemini://example.org/ Example\n# Title\n* item\n>quote\n");
        let out = render_text(&d, &TextRenderOptions::default());
        assert_eq!(
            out,
            "plain\nExample (gemini://example.org/)\nTitle\n* item\n>quote\n"
        );
    }

    #[test]
    fn link_without_label_renders_target() {
        let d = doc("=> gemini://example.org/\n");
        let out = render_text(&d, &TextRenderOptions::default());
        assert_eq!(out, "gemini://example.org/\n");
    }

    #[test]
    fn link_targets_can_be_suppressed() {
        let d = doc("=> gemini://example.org/ Example\n");
        let options = TextRenderOptions {
            include_link_targets: false,
            ..TextRenderOptions::default()
        };
        assert_eq!(render_text(&d, &options), "Example\n");
    }

    #[test]
    fn collapse_never_touches_preformatted() {
        let d = doc("a    b\n```\nx    y\n```\n");
        let options = TextRenderOptions {
            collapse_whitespace: true,
            ..TextRenderOptions::default()
        };
        assert_eq!(render_text(&d, &options), "a b\nx    y\n");
    }

    #[test]
    fn quote_marker_survives_collapsing() {
        let d = doc(">   spaced   out\n");
        let options = TextRenderOptions {
            collapse_whitespace: true,
            ..TextRenderOptions::default()
        };
        assert_eq!(render_text(&d, &options), ">spaced out\n");
    }

    #[test]
    fn custom_bullet() {
        let d = doc("* item\n");
        let options = TextRenderOptions {
            bullet: "- ".to_string(),
            ..TextRenderOptions::default()
        };
        assert_eq!(render_text(&d, &options), "- item\n");
    }

    #[test]
    fn alt_text_bracketed_when_enabled() {
        let d = doc("```diagram\nart\n```\n");
        let silent = render_text(&d, &TextRenderOptions::default());
        assert_eq!(silent, "art\n");
        let options = TextRenderOptions {
            include_alt_text: true,
            ..TextRenderOptions::default()
        };
        assert_eq!(render_text(&d, &options), "[diagram]\nart\n");
    }

    #[test]
    fn rendering_is_idempotent() {
        let d = doc("# Title\n=> gemini://example.org/ Example\n* one\n>two\n```\npre\n```\n");
        let options = TextRenderOptions {
            collapse_whitespace: true,
            ..TextRenderOptions::default()
        };
        let first = render_text(&d, &options);
        let second = render_text(&d, &options);
        assert_eq!(first, second);
    }
}
