/*
 * response.rs
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

//! Response header: `<2-digit-status>[ <meta>]`, at most 1024 bytes with the
//! terminating CRLF, no leading BOM. Meta is free-form; its interpretation
//! (MIME type, redirect target, prompt, error text) is the caller's concern.

use bytes::Bytes;

use crate::error::GeminiError;
use crate::protocol::status::StatusCode;
use crate::protocol::MAX_LINE_BYTES;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parsed response header. Meta is empty only when the status class is 4-6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    pub status: StatusCode,
    pub meta: String,
}

impl ResponseHeader {
    /// Parse the header line, excluding its terminating CRLF. The 1024-byte
    /// bound is applied as if the CRLF were present, so a boundary-less line
    /// recovered at EOF is held to the same limit.
    pub fn parse(bytes: &[u8]) -> Result<ResponseHeader, GeminiError> {
        if bytes.len() + 2 > MAX_LINE_BYTES {
            return Err(GeminiError::Transaction("response header too large".into()));
        }
        let text = std::str::from_utf8(bytes).map_err(|_| {
            GeminiError::Transaction("response header is not valid UTF-8".into())
        })?;
        if bytes.starts_with(UTF8_BOM) {
            return Err(GeminiError::Transaction(
                "response header starts with a byte order mark".into(),
            ));
        }
        let digits = text.as_bytes();
        if digits.len() < 2 || !digits[0].is_ascii_digit() || !digits[1].is_ascii_digit() {
            return Err(GeminiError::Transaction("status code is not valid".into()));
        }
        let code = (digits[0] - b'0') * 10 + (digits[1] - b'0');
        let status = match StatusCode::from_code(code) {
            Some(s) => s,
            None => return Err(GeminiError::Transaction("status code is not valid".into())),
        };
        let rest = &text[2..];
        let meta = if rest.is_empty() {
            if status.requires_meta() {
                return Err(GeminiError::Transaction(format!(
                    "missing meta for status {}",
                    status.code()
                )));
            }
            String::new()
        } else {
            let meta = match rest.strip_prefix(' ') {
                Some(m) => m,
                None => {
                    return Err(GeminiError::Transaction("missing status separator".into()))
                }
            };
            if meta.is_empty() {
                return Err(GeminiError::Transaction("empty meta after separator".into()));
            }
            meta.to_string()
        };
        Ok(ResponseHeader { status, meta })
    }

    /// Serialize back to a wire header line.
    pub fn to_header_line(&self) -> String {
        if self.meta.is_empty() {
            format!("{}\r\n", self.status.code())
        } else {
            format!("{} {}\r\n", self.status.code(), self.meta)
        }
    }
}

/// A settled transaction: parsed header plus the body, which is present only
/// for status 20.
#[derive(Debug, Clone)]
pub struct Response {
    pub header: ResponseHeader,
    pub body: Option<Bytes>,
}

impl Response {
    /// Body decoded as UTF-8, when present and valid.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().and_then(|b| std::str::from_utf8(b).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_meta() {
        let h = ResponseHeader::parse(b"20 text/gemini").unwrap();
        assert_eq!(h.status, StatusCode::Success);
        assert_eq!(h.meta, "text/gemini");
    }

    #[test]
    fn failure_without_meta() {
        let h = ResponseHeader::parse(b"50").unwrap();
        assert_eq!(h.status, StatusCode::PermanentFailure);
        assert_eq!(h.meta, "");
    }

    #[test]
    fn trailing_space_without_meta_fails() {
        let err = ResponseHeader::parse(b"50 ").unwrap_err();
        assert!(err.to_string().contains("empty meta after separator"));
    }

    #[test]
    fn missing_separator_fails() {
        let err = ResponseHeader::parse(b"20text/gemini").unwrap_err();
        assert!(err.to_string().contains("missing status separator"));
    }

    #[test]
    fn missing_required_meta_fails() {
        assert!(ResponseHeader::parse(b"20").is_err());
        assert!(ResponseHeader::parse(b"10").is_err());
        assert!(ResponseHeader::parse(b"31").is_err());
    }

    #[test]
    fn undefined_code_falls_back() {
        let h = ResponseHeader::parse(b"21 text/plain").unwrap();
        assert_eq!(h.status, StatusCode::Success);
        assert_eq!(h.meta, "text/plain");
    }

    #[test]
    fn invalid_codes_fail() {
        assert!(ResponseHeader::parse(b"99 nope").is_err());
        assert!(ResponseHeader::parse(b"0").is_err());
        assert!(ResponseHeader::parse(b"ab cd").is_err());
        assert!(ResponseHeader::parse(b"").is_err());
        assert!(ResponseHeader::parse(b"2").is_err());
    }

    #[test]
    fn bom_is_rejected() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"20 text/gemini");
        let err = ResponseHeader::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("byte order mark"));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = ResponseHeader::parse(b"20 \xFF\xFE").unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn oversized_header_is_rejected() {
        let mut line = b"20 ".to_vec();
        line.extend(std::iter::repeat(b'a').take(1030));
        assert!(ResponseHeader::parse(&line).is_err());
    }

    #[test]
    fn header_round_trips_when_meta_required() {
        for raw in ["20 text/gemini", "10 Enter a query", "31 gemini://example.org/"] {
            let h = ResponseHeader::parse(raw.as_bytes()).unwrap();
            assert_eq!(h.to_header_line(), format!("{}\r\n", raw));
        }
    }

    #[test]
    fn meta_only_header_serializes_without_space() {
        let h = ResponseHeader::parse(b"51").unwrap();
        assert_eq!(h.to_header_line(), "51\r\n");
    }

    #[test]
    fn body_text_decodes_utf8_bodies_only() {
        let header = ResponseHeader::parse(b"20 text/gemini").unwrap();
        let utf8 = Response {
            header: header.clone(),
            body: Some(Bytes::from_static("# caf\u{e9}\n".as_bytes())),
        };
        assert_eq!(utf8.body_text(), Some("# caf\u{e9}\n"));
        let binary = Response {
            header: header.clone(),
            body: Some(Bytes::from_static(b"\xFF\xFE")),
        };
        assert_eq!(binary.body_text(), None);
        let absent = Response { header, body: None };
        assert_eq!(absent.body_text(), None);
    }
}
