/*
 * node.rs
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

//! Line nodes of a parsed gemtext document. One node per source line; every
//! node keeps its 1-based line number and the unmodified source line.

use url::Url;

/// A classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain text, or verbatim content inside a preformatted block.
    Text {
        line: usize,
        raw: String,
        text: String,
        preformatted: bool,
    },
    /// `=> target [label]`. `url` is the target resolved to an absolute URL;
    /// absent when no base URL was supplied or resolution failed.
    Link {
        line: usize,
        raw: String,
        target: String,
        label: Option<String>,
        url: Option<Url>,
    },
    /// `#`, `##`, or `###`.
    Heading {
        line: usize,
        raw: String,
        level: u8,
        text: String,
    },
    /// `* item` (text untrimmed after the marker).
    ListItem {
        line: usize,
        raw: String,
        text: String,
    },
    /// `>quote` (text untrimmed after the marker).
    Quote {
        line: usize,
        raw: String,
        text: String,
    },
    /// A ``` fence line. `entering` is true when the previous state was
    /// outside a preformatted block.
    PreformatToggle {
        line: usize,
        raw: String,
        alt: String,
        entering: bool,
    },
}

impl Node {
    /// 1-based source line number.
    pub fn line_number(&self) -> usize {
        match self {
            Node::Text { line, .. }
            | Node::Link { line, .. }
            | Node::Heading { line, .. }
            | Node::ListItem { line, .. }
            | Node::Quote { line, .. }
            | Node::PreformatToggle { line, .. } => *line,
        }
    }

    /// The unmodified source line.
    pub fn raw(&self) -> &str {
        match self {
            Node::Text { raw, .. }
            | Node::Link { raw, .. }
            | Node::Heading { raw, .. }
            | Node::ListItem { raw, .. }
            | Node::Quote { raw, .. }
            | Node::PreformatToggle { raw, .. } => raw,
        }
    }
}
