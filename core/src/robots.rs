/*
 * robots.rs
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

//! Robots policy files: `User-agent:` / `Disallow:` directives in
//! blank-line-delimited groups. Shares the gemtext line normalization.
//! Wildcard expansion and `Allow:` directives are deliberately not
//! interpreted; unknown directives pass through unparsed.

use url::Url;

use crate::diagnostics::{Diagnostic, ParseError};
use crate::gemtext::{normalize_lines, strict_failure, ParseMode};

/// Robots parse options. `base_url` has no meaning for this grammar, so the
/// policy parser takes its own option set.
#[derive(Debug, Clone)]
pub struct RobotsParseOptions {
    pub mode: ParseMode,
    pub allow_bare_line_feeds: bool,
}

impl Default for RobotsParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Permissive,
            allow_bare_line_feeds: true,
        }
    }
}

/// One blank-line-delimited group: agent tokens plus disallow prefixes,
/// both in source order. Empty disallow values are kept here and filtered
/// only at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsGroup {
    pub agents: Vec<String>,
    pub disallow: Vec<String>,
}

/// An ordered sequence of groups plus the diagnostics recorded while
/// parsing. Immutable once built.
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    pub groups: Vec<RobotsGroup>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a robots policy file.
pub fn parse(source: &str, options: &RobotsParseOptions) -> Result<RobotsPolicy, ParseError> {
    let mut diagnostics = Vec::new();
    let lines = normalize_lines(source, options.allow_bare_line_feeds, &mut diagnostics);

    let mut groups = Vec::new();
    let mut agents: Vec<String> = Vec::new();
    let mut disallow: Vec<String> = Vec::new();

    let mut flush = |agents: &mut Vec<String>, disallow: &mut Vec<String>| {
        if !agents.is_empty() {
            groups.push(RobotsGroup {
                agents: std::mem::take(agents),
                disallow: std::mem::take(disallow),
            });
        } else {
            disallow.clear();
        }
    };

    for (index, raw) in lines.iter().enumerate() {
        let number = index + 1;
        let content = raw.trim_start();
        if content.is_empty() {
            flush(&mut agents, &mut disallow);
            continue;
        }
        if content.starts_with('#') {
            continue;
        }
        let Some(colon) = content.find(':') else {
            diagnostics.push(Diagnostic::error(
                number,
                1,
                "directive line has no colon",
            ));
            continue;
        };
        let directive = content[..colon].trim().to_ascii_lowercase();
        let value = content[colon + 1..].trim();
        match directive.as_str() {
            "user-agent" => {
                if value.is_empty() {
                    diagnostics.push(Diagnostic::error(
                        number,
                        1,
                        "user-agent directive has no value",
                    ));
                    continue;
                }
                // A fresh user-agent after disallow lines starts a new
                // group; consecutive user-agent lines share one.
                if !disallow.is_empty() {
                    flush(&mut agents, &mut disallow);
                }
                agents.push(value.to_string());
            }
            "disallow" => {
                if agents.is_empty() {
                    diagnostics.push(Diagnostic::error(
                        number,
                        1,
                        "disallow directive before any user-agent",
                    ));
                    continue;
                }
                disallow.push(value.to_string());
            }
            _ => {}
        }
    }
    flush(&mut agents, &mut disallow);

    if options.mode == ParseMode::Strict {
        if let Some(err) = strict_failure(&diagnostics) {
            return Err(err);
        }
    }
    Ok(RobotsPolicy {
        groups,
        diagnostics,
    })
}

/// Parse raw bytes, validating UTF-8 first.
pub fn parse_bytes(bytes: &[u8], options: &RobotsParseOptions) -> Result<RobotsPolicy, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidEncoding)?;
    parse(text, options)
}

impl RobotsPolicy {
    /// Disallow prefixes applying to any of the given agents, matched
    /// case-insensitively against group tokens or the `*` wildcard token.
    /// Deduplicated in first-seen order; empty prefixes are dropped.
    pub fn disallow_prefixes(&self, agents: &[&str]) -> Vec<String> {
        let mut prefixes: Vec<String> = Vec::new();
        for group in &self.groups {
            let applies = group.agents.iter().any(|token| {
                token == "*" || agents.iter().any(|a| a.eq_ignore_ascii_case(token))
            });
            if !applies {
                continue;
            }
            for prefix in &group.disallow {
                if prefix.is_empty() {
                    continue;
                }
                if !prefixes.iter().any(|p| p == prefix) {
                    prefixes.push(prefix.clone());
                }
            }
        }
        prefixes
    }

    /// Whether the path (or the path of an absolute URL) is allowed for the
    /// given agents. Disallowed on the first literal prefix match.
    pub fn is_path_allowed(&self, path_or_url: &str, agents: &[&str]) -> bool {
        let path = match Url::parse(path_or_url) {
            Ok(url) => {
                let p = url.path();
                if p.is_empty() {
                    "/".to_string()
                } else {
                    p.to_string()
                }
            }
            Err(_) => {
                if path_or_url.starts_with('/') {
                    path_or_url.to_string()
                } else {
                    format!("/{}", path_or_url)
                }
            }
        };
        !self
            .disallow_prefixes(agents)
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(source: &str) -> RobotsPolicy {
        parse(source, &RobotsParseOptions::default()).unwrap()
    }

    #[test]
    fn groups_split_on_blank_lines() {
        let p = policy(
            "User-agent: *\nDisallow: /private\n\nUser-agent: indexer\nDisallow: /search\n",
        );
        assert_eq!(p.groups.len(), 2);
        assert_eq!(p.groups[0].agents, ["*"]);
        assert_eq!(p.groups[0].disallow, ["/private"]);
        assert_eq!(p.groups[1].agents, ["indexer"]);
        assert_eq!(p.groups[1].disallow, ["/search"]);

        let prefixes = p.disallow_prefixes(&["indexer"]);
        assert_eq!(prefixes, ["/private", "/search"]);
        assert!(!p.is_path_allowed("/private/x", &["indexer"]));
        assert!(!p.is_path_allowed("/search/y", &["indexer"]));
        assert!(p.is_path_allowed("/public/x", &["indexer"]));
    }

    #[test]
    fn user_agent_after_disallow_starts_new_group() {
        let p = policy(
            "User-agent: a\nDisallow: /one\nUser-agent: b\nDisallow: /two\n",
        );
        assert_eq!(p.groups.len(), 2);
        assert_eq!(p.groups[0].agents, ["a"]);
        assert_eq!(p.groups[1].agents, ["b"]);
    }

    #[test]
    fn consecutive_user_agents_share_a_group() {
        let p = policy("User-agent: a\nUser-agent: b\nDisallow: /x\n");
        assert_eq!(p.groups.len(), 1);
        assert_eq!(p.groups[0].agents, ["a", "b"]);
        assert_eq!(p.disallow_prefixes(&["B"]), ["/x"]);
    }

    #[test]
    fn comments_and_unknown_directives_ignored() {
        let p = policy(
            "# preamble\nUser-agent: *\nAllow: /whatever\nCrawl-delay: 10\nDisallow: /x\n",
        );
        assert_eq!(p.groups.len(), 1);
        assert_eq!(p.groups[0].disallow, ["/x"]);
        assert!(p.diagnostics.is_empty());
    }

    #[test]
    fn directive_without_colon_is_error() {
        let p = policy("User-agent: *\nDisallow /x\n");
        assert_eq!(p.groups[0].disallow.len(), 0);
        assert!(p.diagnostics.iter().any(|d| d.is_error()));
    }

    #[test]
    fn empty_user_agent_value_is_error() {
        let p = policy("User-agent:\nDisallow: /x\n");
        assert!(p.groups.is_empty());
        let errors: Vec<_> = p.diagnostics.iter().filter(|d| d.is_error()).collect();
        // Empty user-agent, then disallow with no agents collected.
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn disallow_before_user_agent_is_error() {
        let p = policy("Disallow: /x\nUser-agent: *\nDisallow: /y\n");
        assert_eq!(p.groups.len(), 1);
        assert_eq!(p.groups[0].disallow, ["/y"]);
        assert!(p.diagnostics.iter().any(|d| d.is_error()));
    }

    #[test]
    fn empty_disallow_kept_in_group_dropped_at_query() {
        let p = policy("User-agent: *\nDisallow:\nDisallow: /x\n");
        assert_eq!(p.groups[0].disallow, ["", "/x"]);
        assert_eq!(p.disallow_prefixes(&["anything"]), ["/x"]);
    }

    #[test]
    fn prefixes_deduplicate_in_first_seen_order() {
        let p = policy(
            "User-agent: *\nDisallow: /x\n\nUser-agent: bot\nDisallow: /x\nDisallow: /a\n",
        );
        assert_eq!(p.disallow_prefixes(&["bot"]), ["/x", "/a"]);
    }

    #[test]
    fn agent_matching_is_case_insensitive() {
        let p = policy("User-agent: Indexer\nDisallow: /x\n");
        assert_eq!(p.disallow_prefixes(&["INDEXER"]), ["/x"]);
        assert!(p.disallow_prefixes(&["other"]).is_empty());
    }

    #[test]
    fn absolute_url_is_reduced_to_its_path() {
        let p = policy("User-agent: *\nDisallow: /private\n");
        assert!(!p.is_path_allowed("gemini://example.org/private/x", &["bot"]));
        assert!(p.is_path_allowed("gemini://example.org/public", &["bot"]));
        // Empty path defaults to /.
        let root = policy("User-agent: *\nDisallow: /\n");
        assert!(!root.is_path_allowed("gemini://example.org", &["bot"]));
    }

    #[test]
    fn relative_path_gains_leading_slash() {
        let p = policy("User-agent: *\nDisallow: /private\n");
        assert!(!p.is_path_allowed("private/x", &["bot"]));
        assert!(p.is_path_allowed("public", &["bot"]));
    }

    #[test]
    fn strict_mode_fails_on_error_lines() {
        let options = RobotsParseOptions {
            mode: ParseMode::Strict,
            ..RobotsParseOptions::default()
        };
        assert!(matches!(
            parse("Disallow: /x\n", &options),
            Err(ParseError::Failed(_))
        ));
        assert!(parse("User-agent: *\nDisallow: /x\n", &options).is_ok());
    }

    #[test]
    fn trailing_group_flushes_at_end_of_input() {
        let p = policy("User-agent: *\nDisallow: /x");
        assert_eq!(p.groups.len(), 1);
    }
}
