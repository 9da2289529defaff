use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use tokio::net::TcpStream;
use url::Url;

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    pub async fn connect(url: &Url) -> Result<SocketType, NetError> {
        let secure = match url.scheme() {
            "http" => false,
            "https" => true,
            _ => return Err(NetError::UnknownUrlScheme),
        };
        #[cfg(not(feature = "boringssl"))]
        if secure {
            tracing::debug!(url = %url, "https requested but TLS support is not compiled in");
            return Err(NetError::UnknownUrlScheme);
        }

        let host = url.host_str().ok_or(NetError::InvalidUrl)?;
        let port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;
        // IPv6 literals come back bracketed from host_str().
        let bare_host = host.trim_start_matches('[').trim_end_matches(']');

        // 1. DNS Resolution
        let addrs: Vec<_> = tokio::net::lookup_host((bare_host, port))
            .await
            .dns_context(bare_host)?
            .collect();
        if addrs.is_empty() {
            return Err(NetError::NameNotResolved);
        }
        tracing::debug!(host = %bare_host, count = addrs.len(), "DNS resolution complete");

        // 2. TCP Connect
        let mut last_err = None;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(addr = %addr, error = %e, "TCP connect attempt failed");
                    last_err = Some(e);
                }
            }
        }
        let stream = match (stream, last_err) {
            (Some(s), _) => s,
            (None, Some(e)) => return Err(e).connection_context(bare_host, port),
            (None, None) => return Err(NetError::ConnectionFailed),
        };
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(error = %e, "failed to set TCP_NODELAY");
        }
        if let Ok(peer) = stream.peer_addr() {
            tracing::debug!(peer = %peer, "TCP connected");
        }

        // 3. SSL Handshake (if https)
        #[cfg(feature = "boringssl")]
        if secure {
            let tls = crate::socket::tls::TlsConfig::default()
                .connect(bare_host, stream)
                .await?;
            return Ok(SocketType::Ssl(tls));
        }

        Ok(SocketType::Tcp(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f)
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        let url = Url::parse("ftp://localhost/file").unwrap();
        let err = block_on(ConnectJob::connect(&url)).unwrap_err();
        assert_eq!(err, NetError::UnknownUrlScheme);
    }

    #[test]
    fn test_refused_connection_carries_context() {
        // Bind then drop to get a port nobody listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();

        match block_on(ConnectJob::connect(&url)).unwrap_err() {
            NetError::ConnectionFailedTo { host, port: p, .. } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(p, port);
            }
            other => panic!("Expected ConnectionFailedTo, got {:?}", other),
        }
    }

    #[test]
    fn test_connects_to_listener() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        let socket = block_on(ConnectJob::connect(&url)).unwrap();
        assert!(!socket.is_tls());
        assert_eq!(socket.peer_addr().unwrap(), listener.local_addr().unwrap());
    }
}
