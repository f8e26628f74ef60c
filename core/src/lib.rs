/*
 * lib.rs
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

//! Lanterna core: Gemini transactions over TCP/TLS, gemtext documents,
//! robots policy files, and gemtext subscription feeds.
//!
//! The transaction client is async (tokio); the parsers are synchronous,
//! side-effect-free, and safe to run concurrently over independent inputs.

pub mod diagnostics;
pub mod error;
pub mod feed;
pub mod gemtext;
pub mod net;
pub mod protocol;
pub mod robots;

pub use diagnostics::{Diagnostic, ParseError, Severity};
pub use error::GeminiError;
pub use net::{GeminiStream, TlsMode, TransportParameters};
pub use protocol::request::Request;
pub use protocol::response::{Response, ResponseHeader};
pub use protocol::status::StatusCode;
pub use protocol::transaction::TransactionClient;
pub use protocol::MAX_LINE_BYTES;
