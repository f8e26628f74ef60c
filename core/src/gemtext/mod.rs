/*
 * mod.rs
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

//! Gemtext: line-oriented hypertext documents. Parser plus plain-text and
//! Markdown projections of the parsed tree.

mod markdown;
mod node;
mod parser;
mod text;

pub use markdown::{render_markdown, MarkdownRenderOptions};
pub use node::Node;
pub use parser::{parse, parse_bytes, Document, ParseMode, ParseOptions};
pub use text::{render_text, TextRenderOptions};

pub(crate) use parser::{normalize_lines, strict_failure};
