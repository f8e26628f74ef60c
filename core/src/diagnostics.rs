/*
 * diagnostics.rs
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

//! Parser diagnostics shared by the gemtext, robots, and feed parsers.
//! Warnings never block success; errors block success only in strict mode.

use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A single parse diagnostic. Immutable once created; a parse collects them
/// append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: usize,
    /// 1-based character column.
    pub column: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self { line, column, severity: Severity::Warning, message: message.into() }
    }

    pub fn error(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self { line, column, severity: Severity::Error, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sev = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}:{}: {}: {}", self.line, self.column, sev, self.message)
    }
}

/// Failure from a byte- or strict-mode parse entry point.
#[derive(Debug)]
pub enum ParseError {
    /// Byte input was not valid UTF-8. Raised before any tokenization.
    InvalidEncoding,
    /// Strict mode: at least one error-severity diagnostic was recorded.
    /// Carries only the error-severity diagnostics.
    Failed(Vec<Diagnostic>),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidEncoding => write!(f, "input is not valid UTF-8"),
            ParseError::Failed(diags) => {
                write!(f, "parse failed with {} error(s)", diags.len())?;
                for d in diags {
                    write!(f, "\n  {}", d)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ParseError {}
