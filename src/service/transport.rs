//! Byte-stream transports for the service boundary.
//!
//! The envelope protocol only needs an ordered, bidirectional byte stream.
//! Unix domain sockets are used where available, loopback TCP elsewhere.

use crate::error::ConnectionError;
use std::fmt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};

#[cfg(unix)]
use std::path::PathBuf;
#[cfg(unix)]
use tokio::net::{UnixListener, UnixStream};

/// Any stream the envelope protocol can run over.
pub trait ServiceStream: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

impl<T> ServiceStream for T where T: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

/// Boxed stream returned by [`connect`] and [`Listener::accept`].
pub type BoxedStream = Box<dyn ServiceStream>;

/// Where the service listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    #[cfg(unix)]
    Unix(PathBuf),
    Tcp(String),
}

impl Endpoint {
    /// Parse `unix:<path>` or `tcp:<host:port>`.
    pub fn parse(raw: &str) -> Result<Self, ConnectionError> {
        let raw = raw.trim();
        if let Some(addr) = raw.strip_prefix("tcp:") {
            if addr.is_empty() {
                return Err(ConnectionError::UnsupportedEndpoint(raw.to_owned()));
            }
            return Ok(Self::Tcp(addr.to_owned()));
        }
        #[cfg(unix)]
        if let Some(path) = raw.strip_prefix("unix:") {
            if path.is_empty() {
                return Err(ConnectionError::UnsupportedEndpoint(raw.to_owned()));
            }
            return Ok(Self::Unix(PathBuf::from(path)));
        }
        Err(ConnectionError::UnsupportedEndpoint(raw.to_owned()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(unix)]
            Self::Unix(path) => write!(f, "unix:{}", path.display()),
            Self::Tcp(addr) => write!(f, "tcp:{addr}"),
        }
    }
}

/// Open a client stream to `endpoint`.
pub async fn connect(endpoint: &Endpoint) -> Result<BoxedStream, ConnectionError> {
    let unreachable = |source: std::io::Error| ConnectionError::Unreachable {
        endpoint: endpoint.to_string(),
        source,
    };
    match endpoint {
        #[cfg(unix)]
        Endpoint::Unix(path) => {
            let stream = UnixStream::connect(path).await.map_err(unreachable)?;
            Ok(Box::new(stream))
        }
        Endpoint::Tcp(addr) => {
            let stream = TcpStream::connect(addr.as_str())
                .await
                .map_err(unreachable)?;
            stream.set_nodelay(true).map_err(unreachable)?;
            Ok(Box::new(stream))
        }
    }
}

/// Service-side listener.
pub enum Listener {
    #[cfg(unix)]
    Unix {
        listener: UnixListener,
        path: PathBuf,
    },
    Tcp(TcpListener),
}

impl Listener {
    /// Bind `endpoint`. A stale Unix socket file left by a previous run is
    /// replaced; one with a live listener behind it is an `AddrInUse` error.
    pub async fn bind(endpoint: &Endpoint) -> Result<Self, ConnectionError> {
        match endpoint {
            #[cfg(unix)]
            Endpoint::Unix(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                if path.exists() {
                    match std::os::unix::net::UnixStream::connect(path) {
                        Ok(_) => {
                            return Err(ConnectionError::Io(std::io::Error::new(
                                std::io::ErrorKind::AddrInUse,
                                format!("a service is already listening on {}", path.display()),
                            )));
                        }
                        Err(e)
                            if matches!(
                                e.kind(),
                                std::io::ErrorKind::ConnectionRefused
                                    | std::io::ErrorKind::NotFound
                            ) =>
                        {
                            tracing::debug!(path = %path.display(), "removing stale service socket");
                            std::fs::remove_file(path)?;
                        }
                        Err(e) => return Err(ConnectionError::Io(e)),
                    }
                }
                let listener = UnixListener::bind(path)?;
                Ok(Self::Unix {
                    listener,
                    path: path.clone(),
                })
            }
            Endpoint::Tcp(addr) => Ok(Self::Tcp(TcpListener::bind(addr.as_str()).await?)),
        }
    }

    /// The endpoint actually bound (resolves `tcp:…:0` to the chosen port).
    pub fn local_endpoint(&self) -> Result<Endpoint, ConnectionError> {
        match self {
            #[cfg(unix)]
            Self::Unix { path, .. } => Ok(Endpoint::Unix(path.clone())),
            Self::Tcp(listener) => Ok(Endpoint::Tcp(listener.local_addr()?.to_string())),
        }
    }

    /// Wait for the next client.
    pub async fn accept(&self) -> std::io::Result<BoxedStream> {
        match self {
            #[cfg(unix)]
            Self::Unix { listener, .. } => {
                let (stream, _addr) = listener.accept().await?;
                Ok(Box::new(stream))
            }
            Self::Tcp(listener) => {
                let (stream, _addr) = listener.accept().await?;
                stream.set_nodelay(true)?;
                Ok(Box::new(stream))
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Self::Unix { path, .. } = self {
            let _ = std::fs::remove_file(path);
        }
    }
}
