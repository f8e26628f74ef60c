/*
 * status.rs
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

//! Gemini status codes. Two ASCII digits on the wire; undefined values inside
//! 10..=69 fall back to the canonical code of their tens digit.

/// Response status. One variant per code the protocol defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Input,
    SensitiveInput,
    Success,
    RedirectTemporary,
    RedirectPermanent,
    TemporaryFailure,
    ServerUnavailable,
    CgiError,
    ProxyError,
    SlowDown,
    PermanentFailure,
    NotFound,
    Gone,
    ProxyRequestRefused,
    BadRequest,
    ClientCertificateRequired,
    CertificateNotAuthorized,
    CertificateNotValid,
}

impl StatusCode {
    /// Map a wire value to a status. Defined codes map to themselves; any
    /// other value in 10..=69 maps to the canonical code of its tens digit;
    /// values outside 10..=69 are invalid.
    pub fn from_code(code: u8) -> Option<StatusCode> {
        use StatusCode::*;
        let status = match code {
            10 => Input,
            11 => SensitiveInput,
            20 => Success,
            30 => RedirectTemporary,
            31 => RedirectPermanent,
            40 => TemporaryFailure,
            41 => ServerUnavailable,
            42 => CgiError,
            43 => ProxyError,
            44 => SlowDown,
            50 => PermanentFailure,
            51 => NotFound,
            52 => Gone,
            53 => ProxyRequestRefused,
            54 => BadRequest,
            60 => ClientCertificateRequired,
            61 => CertificateNotAuthorized,
            62 => CertificateNotValid,
            _ => match code / 10 {
                1 => Input,
                2 => Success,
                3 => RedirectTemporary,
                4 => TemporaryFailure,
                5 => PermanentFailure,
                6 => ClientCertificateRequired,
                _ => return None,
            },
        };
        Some(status)
    }

    pub fn code(&self) -> u8 {
        use StatusCode::*;
        match self {
            Input => 10,
            SensitiveInput => 11,
            Success => 20,
            RedirectTemporary => 30,
            RedirectPermanent => 31,
            TemporaryFailure => 40,
            ServerUnavailable => 41,
            CgiError => 42,
            ProxyError => 43,
            SlowDown => 44,
            PermanentFailure => 50,
            NotFound => 51,
            Gone => 52,
            ProxyRequestRefused => 53,
            BadRequest => 54,
            ClientCertificateRequired => 60,
            CertificateNotAuthorized => 61,
            CertificateNotValid => 62,
        }
    }

    /// Tens digit of the code.
    pub fn class(&self) -> u8 {
        self.code() / 10
    }

    /// Only code 20 is a success.
    pub fn is_success(&self) -> bool {
        *self == StatusCode::Success
    }

    /// Classes 1-3 carry a mandatory meta (prompt, MIME type, redirect
    /// target); classes 4-6 may omit it.
    pub fn requires_meta(&self) -> bool {
        self.class() <= 3
    }

    /// Short human-readable label.
    pub fn description(&self) -> &'static str {
        use StatusCode::*;
        match self {
            Input => "input",
            SensitiveInput => "sensitive input",
            Success => "success",
            RedirectTemporary => "temporary redirect",
            RedirectPermanent => "permanent redirect",
            TemporaryFailure => "temporary failure",
            ServerUnavailable => "server unavailable",
            CgiError => "CGI error",
            ProxyError => "proxy error",
            SlowDown => "slow down",
            PermanentFailure => "permanent failure",
            NotFound => "not found",
            Gone => "gone",
            ProxyRequestRefused => "proxy request refused",
            BadRequest => "bad request",
            ClientCertificateRequired => "client certificate required",
            CertificateNotAuthorized => "certificate not authorized",
            CertificateNotValid => "certificate not valid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_codes_round_trip() {
        for code in [10, 11, 20, 30, 31, 40, 41, 42, 43, 44, 50, 51, 52, 53, 54, 60, 61, 62] {
            let status = StatusCode::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn undefined_codes_fall_back_to_tens() {
        assert_eq!(StatusCode::from_code(21), Some(StatusCode::Success));
        assert_eq!(StatusCode::from_code(29), Some(StatusCode::Success));
        assert_eq!(StatusCode::from_code(12), Some(StatusCode::Input));
        assert_eq!(StatusCode::from_code(35), Some(StatusCode::RedirectTemporary));
        assert_eq!(StatusCode::from_code(45), Some(StatusCode::TemporaryFailure));
        assert_eq!(StatusCode::from_code(55), Some(StatusCode::PermanentFailure));
        assert_eq!(StatusCode::from_code(69), Some(StatusCode::ClientCertificateRequired));
    }

    #[test]
    fn out_of_range_is_invalid() {
        assert_eq!(StatusCode::from_code(0), None);
        assert_eq!(StatusCode::from_code(9), None);
        assert_eq!(StatusCode::from_code(70), None);
        assert_eq!(StatusCode::from_code(99), None);
    }

    #[test]
    fn only_twenty_is_success() {
        for code in 20..=29 {
            let status = StatusCode::from_code(code).unwrap();
            assert_eq!(status.is_success(), code == 20 || status.code() == 20);
        }
        // All 2x values canonicalize to 20, so is_success holds for the class;
        // a defined non-20 code never reports success.
        assert!(!StatusCode::NotFound.is_success());
        assert!(!StatusCode::Input.is_success());
    }

    #[test]
    fn meta_requirement_follows_class() {
        assert!(StatusCode::Input.requires_meta());
        assert!(StatusCode::Success.requires_meta());
        assert!(StatusCode::RedirectPermanent.requires_meta());
        assert!(!StatusCode::TemporaryFailure.requires_meta());
        assert!(!StatusCode::PermanentFailure.requires_meta());
        assert!(!StatusCode::CertificateNotValid.requires_meta());
    }
}
