/*
 * error.rs
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

//! Request and transaction errors.

use std::fmt;
use std::io;
use std::time::Duration;

/// Errors from building a request or running a transaction. Parse-level
/// failures in documents, policies, and feeds use
/// [`ParseError`](crate::diagnostics::ParseError) instead.
#[derive(Debug)]
pub enum GeminiError {
    /// The request URL is unusable before any connection is attempted.
    Request(String),
    /// Connection, I/O, or response-header failure during a transaction.
    Transaction(String),
    /// The transaction deadline elapsed before a response settled.
    Timeout(Duration),
    /// The transaction was cancelled by
    /// [`stop`](crate::protocol::transaction::TransactionClient::stop).
    Cancelled,
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeminiError::Request(m) => write!(f, "request error: {}", m),
            GeminiError::Transaction(m) => write!(f, "transaction error: {}", m),
            GeminiError::Timeout(limit) => {
                write!(f, "transaction timed out after {:?}", limit)
            }
            GeminiError::Cancelled => write!(f, "transaction cancelled"),
        }
    }
}

impl std::error::Error for GeminiError {}

impl From<io::Error> for GeminiError {
    fn from(e: io::Error) -> Self {
        GeminiError::Transaction(e.to_string())
    }
}
