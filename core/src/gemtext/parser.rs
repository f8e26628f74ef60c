/*
 * parser.rs
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

//! Gemtext parser: line terminator normalization, six-way line
//! classification under a preformatted-block state machine, diagnostics.
//! Permissive mode always returns a document; strict mode fails when any
//! error-severity diagnostic was recorded.

use url::Url;

use crate::diagnostics::{Diagnostic, ParseError};
use crate::gemtext::node::Node;

/// Whether error diagnostics fail the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Permissive,
    Strict,
}

/// Options for a gemtext parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Base for resolving relative link targets.
    pub base_url: Option<Url>,
    /// When false, an LF without a preceding CR is an error diagnostic.
    pub allow_bare_line_feeds: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Permissive,
            base_url: None,
            allow_bare_line_feeds: true,
        }
    }
}

/// A parsed document: original source, one node per line, diagnostics in
/// source order. Immutable once built.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub nodes: Vec<Node>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub fn links(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| matches!(n, Node::Link { .. }))
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }
}

/// Split the source into lines, normalizing CRLF and lone CR to LF.
/// Records a diagnostic for lone CR (error), bare LF when disallowed
/// (error, first occurrence), and a missing final terminator (warning).
/// Never synthesizes an empty trailing line.
pub(crate) fn normalize_lines(
    source: &str,
    allow_bare_lf: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut line = 1usize;
    let mut column = 1usize;
    let mut bare_lf_reported = false;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                } else {
                    diagnostics.push(Diagnostic::error(line, column, "stray carriage return"));
                }
                lines.push(std::mem::take(&mut current));
                line += 1;
                column = 1;
            }
            '\n' => {
                if !allow_bare_lf && !bare_lf_reported {
                    diagnostics.push(Diagnostic::error(
                        line,
                        column,
                        "bare line feed without carriage return",
                    ));
                    bare_lf_reported = true;
                }
                lines.push(std::mem::take(&mut current));
                line += 1;
                column = 1;
            }
            _ => {
                current.push(c);
                column += 1;
            }
        }
    }
    if !current.is_empty() {
        diagnostics.push(Diagnostic::warning(
            line,
            column,
            "missing line terminator at end of input",
        ));
        lines.push(current);
    }
    lines
}

pub(crate) fn strict_failure(diagnostics: &[Diagnostic]) -> Option<ParseError> {
    let errors: Vec<Diagnostic> = diagnostics.iter().filter(|d| d.is_error()).cloned().collect();
    if errors.is_empty() {
        None
    } else {
        Some(ParseError::Failed(errors))
    }
}

/// Parse gemtext source into a document.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let mut diagnostics = Vec::new();
    let lines = normalize_lines(source, options.allow_bare_line_feeds, &mut diagnostics);
    let mut nodes = Vec::with_capacity(lines.len());
    let mut in_preformatted = false;
    for (index, raw) in lines.iter().enumerate() {
        let number = index + 1;
        nodes.push(classify(
            raw,
            number,
            &mut in_preformatted,
            options.base_url.as_ref(),
            &mut diagnostics,
        ));
    }
    if in_preformatted {
        diagnostics.push(Diagnostic::warning(
            lines.len(),
            1,
            "unterminated preformatted block",
        ));
    }
    if options.mode == ParseMode::Strict {
        if let Some(err) = strict_failure(&diagnostics) {
            return Err(err);
        }
    }
    Ok(Document {
        source: source.to_string(),
        nodes,
        diagnostics,
    })
}

/// Parse raw bytes, validating UTF-8 before any tokenization.
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Document, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidEncoding)?;
    parse(text, options)
}

/// First match wins, given the running preformatted state.
fn classify(
    raw: &str,
    number: usize,
    in_preformatted: &mut bool,
    base_url: Option<&Url>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Node {
    if let Some(alt) = raw.strip_prefix("```") {
        let entering = !*in_preformatted;
        *in_preformatted = !*in_preformatted;
        return Node::PreformatToggle {
            line: number,
            raw: raw.to_string(),
            alt: alt.to_string(),
            entering,
        };
    }
    if *in_preformatted {
        return Node::Text {
            line: number,
            raw: raw.to_string(),
            text: raw.to_string(),
            preformatted: true,
        };
    }
    if let Some(rest) = raw.strip_prefix("=>") {
        return parse_link(raw, rest, number, base_url, diagnostics);
    }
    let hashes = raw.chars().take_while(|&c| c == '#').count();
    if hashes > 0 {
        let level = hashes.min(3);
        let text = raw[level..].trim_start_matches([' ', '\t']).to_string();
        return Node::Heading {
            line: number,
            raw: raw.to_string(),
            level: level as u8,
            text,
        };
    }
    if let Some(text) = raw.strip_prefix("* ") {
        return Node::ListItem {
            line: number,
            raw: raw.to_string(),
            text: text.to_string(),
        };
    }
    if let Some(text) = raw.strip_prefix('>') {
        return Node::Quote {
            line: number,
            raw: raw.to_string(),
            text: text.to_string(),
        };
    }
    Node::Text {
        line: number,
        raw: raw.to_string(),
        text: raw.to_string(),
        preformatted: false,
    }
}

fn text_fallback(raw: &str, number: usize) -> Node {
    Node::Text {
        line: number,
        raw: raw.to_string(),
        text: raw.to_string(),
        preformatted: false,
    }
}

/// `=>` line: whitespace-separated target, then optional label. A missing
/// target or a whitespace-only remainder degrades the line to plain text
/// with an error diagnostic.
fn parse_link(
    raw: &str,
    rest: &str,
    number: usize,
    base_url: Option<&Url>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Node {
    let after = rest.trim_start_matches([' ', '\t']);
    let target_column = raw[..raw.len() - after.len()].chars().count() + 1;
    let target_end = after.find([' ', '\t']).unwrap_or(after.len());
    let target = &after[..target_end];
    if target.is_empty() {
        diagnostics.push(Diagnostic::error(
            number,
            target_column,
            "link line has no target",
        ));
        return text_fallback(raw, number);
    }
    let remainder = &after[target_end..];
    let label = if remainder.is_empty() {
        None
    } else {
        let stripped = remainder.trim_start_matches([' ', '\t']);
        if stripped.is_empty() {
            diagnostics.push(Diagnostic::error(
                number,
                raw[..raw.len() - remainder.len()].chars().count() + 1,
                "link line has whitespace but no label",
            ));
            return text_fallback(raw, number);
        }
        Some(stripped.to_string())
    };
    let url = match resolve_target(target, base_url) {
        Some(u) => Some(u),
        None => {
            diagnostics.push(Diagnostic::warning(
                number,
                target_column,
                "cannot resolve link target to an absolute URL",
            ));
            None
        }
    };
    Node::Link {
        line: number,
        raw: raw.to_string(),
        target: target.to_string(),
        label,
        url,
    }
}

/// A target that already carries a scheme is used as-is; anything else is
/// resolved against the base URL.
fn resolve_target(target: &str, base_url: Option<&Url>) -> Option<Url> {
    if let Ok(url) = Url::parse(target) {
        return Some(url);
    }
    base_url.and_then(|base| base.join(target).ok())
}
