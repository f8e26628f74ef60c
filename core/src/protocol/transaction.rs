/*
 * transaction.rs
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

//! One-shot transaction client: send the request line, frame the response
//! header out of the byte stream, read the body for status 20.
//!
//! At most one transaction is in flight per client; a second concurrent
//! start fails with a busy error rather than queuing. The first of
//! {success, failure, cancellation, timeout} to occur settles the
//! transaction; the losing branches of the select are dropped, which tears
//! down the connection.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::watch;

use crate::error::GeminiError;
use crate::net::TransportParameters;
use crate::protocol::request::Request;
use crate::protocol::response::{Response, ResponseHeader};
use crate::protocol::MAX_LINE_BYTES;

const RECV_CHUNK: usize = 4096;

/// Byte offset of the first CR LF pair, if any.
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Client for a single server connection. Owns no connection between
/// transactions; each `start` connects, runs to settlement, and tears down.
pub struct TransactionClient {
    transport: TransportParameters,
    in_flight: AtomicBool,
    cancel: watch::Sender<bool>,
}

impl TransactionClient {
    pub fn new(transport: TransportParameters) -> Self {
        let (cancel, _) = watch::channel(false);
        Self {
            transport,
            in_flight: AtomicBool::new(false),
            cancel,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one transaction to settlement. Fails immediately with a busy
    /// error if another transaction is already in flight on this client.
    pub async fn start(
        &self,
        request: &Request,
        timeout: Duration,
    ) -> Result<Response, GeminiError> {
        if timeout.is_zero() {
            return Err(GeminiError::Request(
                "timeout must be greater than zero".into(),
            ));
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(GeminiError::Transaction(
                "transaction already in flight".into(),
            ));
        }
        // A stop() from a previous transaction must not settle this one.
        self.cancel.send_replace(false);
        let mut cancel_rx = self.cancel.subscribe();

        let result = tokio::select! {
            r = self.execute(request) => r,
            _ = tokio::time::sleep(timeout) => Err(GeminiError::Timeout(timeout)),
            _ = Self::cancel_signalled(&mut cancel_rx) => Err(GeminiError::Cancelled),
        };
        self.in_flight.store(false, Ordering::Release);
        result
    }

    /// Cancel the in-flight transaction, if any. Idempotent, callable from
    /// any state.
    pub fn stop(&self) {
        self.cancel.send_replace(true);
    }

    async fn cancel_signalled(rx: &mut watch::Receiver<bool>) {
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender gone: no cancel can ever arrive.
                std::future::pending::<()>().await;
            }
        }
    }

    async fn execute(&self, request: &Request) -> Result<Response, GeminiError> {
        let mut stream = self
            .transport
            .connect(request.host(), request.port())
            .await
            .map_err(|e| GeminiError::Transaction(format!("connect failed: {}", e)))?;

        // Full request line in one shot.
        stream.write_all(&request.to_wire()).await?;
        stream.flush().await?;

        let mut buf = BytesMut::with_capacity(RECV_CHUNK);
        let header_end = loop {
            if let Some(pos) = find_crlf(&buf) {
                break pos;
            }
            if buf.len() > MAX_LINE_BYTES {
                return Err(GeminiError::Transaction("response header too large".into()));
            }
            let mut chunk = [0u8; RECV_CHUNK];
            match stream.read(&mut chunk).await {
                Ok(0) => {
                    // Stream completed without a boundary: try to salvage a
                    // header from what was accumulated; otherwise report the
                    // stream condition, not the parse failure.
                    return match ResponseHeader::parse(&buf) {
                        Ok(header) => Ok(Response { header, body: None }),
                        Err(_) => Err(GeminiError::Transaction(
                            "connection closed before response header".into(),
                        )),
                    };
                }
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                Err(e) => {
                    return match ResponseHeader::parse(&buf) {
                        Ok(header) => Ok(Response { header, body: None }),
                        Err(_) => Err(e.into()),
                    };
                }
            }
        };

        if header_end + 2 > MAX_LINE_BYTES {
            return Err(GeminiError::Transaction("response header too large".into()));
        }
        let header = ResponseHeader::parse(&buf[..header_end])?;
        if !header.status.is_success() {
            // Trailing bytes on a non-success response are discarded.
            return Ok(Response { header, body: None });
        }

        let mut body = BytesMut::from(&buf[header_end + 2..]);
        loop {
            let mut chunk = [0u8; RECV_CHUNK];
            match stream.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => body.extend_from_slice(&chunk[..n]),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Response {
            header,
            body: Some(body.freeze()),
        })
    }
}
