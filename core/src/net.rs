/*
 * net.rs
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

//! Transport parameters and streams: TCP, or TCP + TLS (1.2 minimum).
//! Plaintext mode exists for local testing; the no-verification TLS mode
//! accepts any certificate and is debug-only.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::ClientConfig;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, RootCertStore, SignatureScheme};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream as TokioTlsStream;
use tokio_rustls::TlsConnector;

/// Certificate handling for TLS transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Standard validation against the platform trust store.
    SystemTrust,
    /// Accept any certificate. Debug-only.
    InsecureNoVerification,
}

/// Build a root certificate store: platform native certs first, then
/// webpki-roots as fallback.
fn build_root_store() -> RootCertStore {
    let mut root_store = RootCertStore::empty();
    if let Ok(certs) = rustls_native_certs::load_native_certs() {
        for cert in certs {
            let _ = root_store.add(cert);
        }
    }
    if root_store.is_empty() {
        root_store.roots = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    }
    root_store
}

/// Verifier stub for [`TlsMode::InsecureNoVerification`]: every certificate
/// and signature is accepted.
#[derive(Debug)]
struct NoVerification;

impl ServerCertVerifier for NoVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::ED25519,
        ]
    }
}

/// TLS 1.2 is the floor for all secure transports.
fn client_config(mode: TlsMode) -> Arc<ClientConfig> {
    let versions = &[
        &rustls::version::TLS12,
        &rustls::version::TLS13,
    ];
    let builder = ClientConfig::builder_with_protocol_versions(versions);
    let config = match mode {
        TlsMode::SystemTrust => builder
            .with_root_certificates(build_root_store())
            .with_no_client_auth(),
        TlsMode::InsecureNoVerification => builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerification))
            .with_no_client_auth(),
    };
    Arc::new(config)
}

/// How a transaction client reaches the server: raw TCP (debug) or TLS.
/// Explicit constructor parameter on the client, never a process-wide flag.
#[derive(Clone)]
pub struct TransportParameters {
    connector: Option<TlsConnector>,
}

impl TransportParameters {
    /// TCP + TLS with the given certificate handling.
    pub fn tls(mode: TlsMode) -> Self {
        Self {
            connector: Some(TlsConnector::from(client_config(mode))),
        }
    }

    /// Raw TCP, no TLS. For local testing against plaintext servers.
    pub fn plaintext() -> Self {
        Self { connector: None }
    }

    pub fn is_plaintext(&self) -> bool {
        self.connector.is_none()
    }

    /// Connect to host:port, handshaking immediately when TLS is configured.
    pub async fn connect(&self, host: &str, port: u16) -> io::Result<GeminiStream> {
        let addr = format!("{}:{}", host, port);
        let tcp = TcpStream::connect(&addr).await?;
        match &self.connector {
            None => Ok(GeminiStream::Plain(tcp)),
            Some(connector) => {
                let server_name = ServerName::try_from(host.to_string())
                    .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "invalid host name"))?;
                let tls = connector
                    .connect(server_name, tcp)
                    .await
                    .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e))?;
                Ok(GeminiStream::Tls(Box::new(tls)))
            }
        }
    }
}

impl std::fmt::Debug for TransportParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportParameters")
            .field("plaintext", &self.is_plaintext())
            .finish()
    }
}

/// Unified stream: plain TCP or TLS. Implements AsyncRead + AsyncWrite.
pub enum GeminiStream {
    Plain(TcpStream),
    Tls(Box<TokioTlsStream<TcpStream>>),
}

impl AsyncRead for GeminiStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut *self {
            GeminiStream::Plain(s) => Pin::new(s).poll_read(cx, buf),
            GeminiStream::Tls(s) => Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for GeminiStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut *self {
            GeminiStream::Plain(s) => Pin::new(s).poll_write(cx, buf),
            GeminiStream::Tls(s) => Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            GeminiStream::Plain(s) => Pin::new(s).poll_flush(cx),
            GeminiStream::Tls(s) => Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            GeminiStream::Plain(s) => Pin::new(s).poll_shutdown(cx),
            GeminiStream::Tls(s) => Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}
