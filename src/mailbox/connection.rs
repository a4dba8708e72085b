//! TCP/TLS/SOCKS5 connection establishment shared by the IMAP and NNTP
//! clients, adapted from the host application's `imap::client` connect
//! routine and its `common::tls`/`common::rustls` TLS setup.

use std::sync::Arc;

use rustls_pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::{client::TlsStream, TlsConnector};

use crate::error::{ErrorKind, MailCoreResult};
use crate::mailbox::account::{AccountConfig, TlsMode};
use crate::raise_error;

/// Either a plain TCP stream or one wrapped in TLS, behind a single type so
/// callers (the IMAP/NNTP wire layers) don't need to be generic over it.
#[derive(Debug)]
pub enum MailStream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl AsyncRead for MailStream {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            MailStream::Plain(s) => std::pin::Pin::new(s).poll_read(cx, buf),
            MailStream::Tls(s) => std::pin::Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for MailStream {
    fn poll_write(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> std::task::Poll<std::io::Result<usize>> {
        match self.get_mut() {
            MailStream::Plain(s) => std::pin::Pin::new(s).poll_write(cx, buf),
            MailStream::Tls(s) => std::pin::Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            MailStream::Plain(s) => std::pin::Pin::new(s).poll_flush(cx),
            MailStream::Tls(s) => std::pin::Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            MailStream::Plain(s) => std::pin::Pin::new(s).poll_shutdown(cx),
            MailStream::Tls(s) => std::pin::Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}

fn tls_connector() -> TlsConnector {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}

async fn dial_tcp(account: &AccountConfig) -> MailCoreResult<TcpStream> {
    match &account.socks_proxy {
        Some(proxy) => {
            let stream = tokio_socks::tcp::Socks5Stream::connect(
                proxy.as_str(),
                (account.host.as_str(), account.port),
            )
            .await
            .map_err(|e| raise_error!(format!("SOCKS5 connect failed: {e}"), ErrorKind::Io))?;
            Ok(stream.into_inner())
        }
        None => TcpStream::connect((account.host.as_str(), account.port))
            .await
            .map_err(|e| raise_error!(format!("TCP connect failed: {e}"), ErrorKind::Io)),
    }
}

/// Opens a connection to `account`, performing implicit TLS immediately if
/// configured. `STARTTLS`/`STLS` upgrades happen afterward via
/// [`upgrade_to_tls`] once the protocol layer has read the greeting and
/// issued the upgrade command.
pub async fn connect(account: &AccountConfig) -> MailCoreResult<MailStream> {
    let tcp = dial_tcp(account).await?;
    match account.tls {
        TlsMode::Implicit => {
            let stream = wrap_tls(tcp, &account.host).await?;
            Ok(MailStream::Tls(Box::new(stream)))
        }
        TlsMode::None | TlsMode::StartTls => Ok(MailStream::Plain(tcp)),
    }
}

/// Wraps an already-connected plain stream in TLS, consuming it. Used after
/// a `STARTTLS`/`STLS` command succeeds on a [`MailStream::Plain`].
pub async fn upgrade_to_tls(stream: TcpStream, host: &str) -> MailCoreResult<MailStream> {
    let tls = wrap_tls(stream, host).await?;
    Ok(MailStream::Tls(Box::new(tls)))
}

async fn wrap_tls(tcp: TcpStream, host: &str) -> MailCoreResult<TlsStream<TcpStream>> {
    let connector = tls_connector();
    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| raise_error!(format!("invalid TLS server name {host}: {e}"), ErrorKind::Tls))?;
    connector
        .connect(server_name, tcp)
        .await
        .map_err(|e| raise_error!(format!("TLS handshake failed: {e}"), ErrorKind::Tls))
}
