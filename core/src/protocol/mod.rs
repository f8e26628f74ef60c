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

//! Gemini wire protocol: request line, response header, status codes, and
//! the one-shot transaction client.

pub mod request;
pub mod response;
pub mod status;
pub mod transaction;

/// Shared bound on both the request line and the response header,
/// CRLF included.
pub const MAX_LINE_BYTES: usize = 1024;

/// Default port for the gemini scheme.
pub const DEFAULT_PORT: u16 = 1965;
