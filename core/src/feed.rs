/*
 * feed.rs
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

//! Gemtext subscription feeds: the page title is the feed title, dated link
//! lines (`YYYY-MM-DD <title>`) are the entries. Built directly on parsed
//! document nodes; the underlying document parse is always permissive, with
//! strictness applied over the combined diagnostics afterwards.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use url::Url;

use crate::diagnostics::{Diagnostic, ParseError};
use crate::gemtext::{self, Node, ParseMode, ParseOptions};

/// Feed parse options.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub mode: ParseMode,
    pub allow_bare_line_feeds: bool,
    /// `updated` value for a feed with no entries.
    pub fallback_updated: DateTime<Utc>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Permissive,
            allow_bare_line_feeds: true,
            fallback_updated: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// A feed entry: resolved URL, noon-UTC date stamp, derived title, and the
/// source line of its link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub url: Url,
    pub updated: DateTime<Utc>,
    pub title: String,
    pub line: usize,
}

/// A parsed subscription feed. `diagnostics` combines the underlying
/// document diagnostics with the feed-specific ones, in that order.
#[derive(Debug, Clone)]
pub struct Feed {
    pub url: Url,
    pub title: String,
    pub subtitle: Option<String>,
    pub updated: DateTime<Utc>,
    pub entries: Vec<FeedEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// `NNNN-NN-NN` over the first ten bytes.
fn date_shape(bytes: &[u8]) -> bool {
    if bytes.len() < 10 {
        return false;
    }
    bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

/// Noon UTC of the labelled calendar date, or None when the digits do not
/// name a real date.
fn entry_timestamp(prefix: &str) -> Option<DateTime<Utc>> {
    let year: i32 = prefix[..4].parse().ok()?;
    let month: u32 = prefix[5..7].parse().ok()?;
    let day: u32 = prefix[8..10].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0)?))
}

/// Entry title: everything from the first whitespace anywhere in the label,
/// trimmed, with leading `-`, `:`, `|` separators stripped.
fn entry_title(label: &str) -> String {
    let Some((index, _)) = label.char_indices().find(|(_, c)| c.is_whitespace()) else {
        return String::new();
    };
    let mut title = label[index..].trim();
    while let Some(rest) = title.strip_prefix(['-', ':', '|']) {
        title = rest.trim();
    }
    title.to_string()
}

/// Parse a subscription feed from gemtext source.
pub fn parse(source: &str, feed_url: &Url, options: &FeedOptions) -> Result<Feed, ParseError> {
    // The caller's strictness is applied below over the combined
    // diagnostics; the document parse itself must not fail early.
    let doc_options = ParseOptions {
        mode: ParseMode::Permissive,
        base_url: Some(feed_url.clone()),
        allow_bare_line_feeds: options.allow_bare_line_feeds,
    };
    let document = gemtext::parse(source, &doc_options)?;

    let mut diagnostics = Vec::new();

    let mut title = None;
    let mut title_line = 0usize;
    for node in &document.nodes {
        if let Node::Heading { level: 1, text, line, .. } = node {
            title = Some(text.clone());
            title_line = *line;
            break;
        }
    }
    let title = match title {
        Some(t) => t,
        None => {
            diagnostics.push(Diagnostic::error(1, 1, "feed has no level-1 heading"));
            feed_url.as_str().to_string()
        }
    };

    // Subtitle: first level-2 heading after the title, stopping at any
    // other structural line or non-blank text.
    let mut subtitle = None;
    if title_line > 0 {
        for node in document.nodes.iter().filter(|n| n.line_number() > title_line) {
            match node {
                Node::Heading { level: 2, text, .. } => {
                    subtitle = Some(text.clone());
                    break;
                }
                Node::Heading { .. }
                | Node::Link { .. }
                | Node::ListItem { .. }
                | Node::Quote { .. }
                | Node::PreformatToggle { .. } => break,
                Node::Text { text, .. } => {
                    if !text.trim().is_empty() {
                        break;
                    }
                }
            }
        }
    }

    let mut entries = Vec::new();
    for node in &document.nodes {
        let Node::Link { label: Some(label), url, line, .. } = node else {
            continue;
        };
        if !date_shape(label.as_bytes()) {
            continue;
        }
        let prefix = &label[..10];
        let Some(updated) = entry_timestamp(prefix) else {
            diagnostics.push(Diagnostic::warning(
                *line,
                1,
                format!("{} is not a valid calendar date", prefix),
            ));
            continue;
        };
        let Some(url) = url.clone() else {
            diagnostics.push(Diagnostic::error(
                *line,
                1,
                "cannot resolve entry link to an absolute URL",
            ));
            continue;
        };
        let mut entry_name = entry_title(label);
        if entry_name.is_empty() {
            diagnostics.push(Diagnostic::warning(*line, 1, "entry has no title"));
            entry_name = url.as_str().to_string();
        }
        entries.push(FeedEntry {
            url,
            updated,
            title: entry_name,
            line: *line,
        });
    }

    let updated = entries
        .iter()
        .map(|e| e.updated)
        .max()
        .unwrap_or(options.fallback_updated);

    if options.mode == ParseMode::Strict {
        let combined: Vec<Diagnostic> = document
            .diagnostics
            .iter()
            .chain(diagnostics.iter())
            .filter(|d| d.is_error())
            .cloned()
            .collect();
        if !combined.is_empty() {
            return Err(ParseError::Failed(combined));
        }
    }

    let mut all = document.diagnostics;
    all.extend(diagnostics);
    Ok(Feed {
        url: feed_url.clone(),
        title,
        subtitle,
        updated,
        entries,
        diagnostics: all,
    })
}

/// Parse raw bytes, validating UTF-8 first.
pub fn parse_bytes(bytes: &[u8], feed_url: &Url, options: &FeedOptions) -> Result<Feed, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidEncoding)?;
    parse(text, feed_url, options)
}
