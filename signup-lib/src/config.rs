//! Backend and client configuration

use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::net::SocketAddrV4;
use std::time::Duration;

/// Address the backend listens on unless told otherwise.
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8080));

/// Configuration for the sign-up backend.
///
/// # Example
///
/// ```
/// use signup_lib::ServerConfig;
///
/// let config = ServerConfig::default()
///     .with_addr("127.0.0.1:0".parse().unwrap())
///     .with_taken_usernames(["alice", "bob"]);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind.
    ///
    /// Default: `127.0.0.1:8080`
    pub addr: SocketAddr,

    /// Usernames that are unavailable from the start.
    ///
    /// Default: `admin`, `root`
    pub taken_usernames: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR,
            taken_usernames: vec!["admin".to_string(), "root".to_string()],
        }
    }
}

impl ServerConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listen address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Replaces the initially taken usernames.
    pub fn with_taken_usernames<I, S>(mut self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taken_usernames = usernames.into_iter().map(Into::into).collect();
        self
    }
}

/// Configuration for [`SignupClient`](crate::SignupClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root URL.
    ///
    /// Default: `http://127.0.0.1:8080`
    pub base_url: String,

    /// Per-request timeout.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://{DEFAULT_ADDR}"),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend root URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let server = ServerConfig::new();
        assert_eq!(server.addr.port(), 8080);
        assert_eq!(server.taken_usernames, vec!["admin", "root"]);

        let client = ClientConfig::new();
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
        assert_eq!(client.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builders() {
        let server = ServerConfig::new().with_taken_usernames(["carol"]);
        assert_eq!(server.taken_usernames, vec!["carol"]);

        let client = ClientConfig::new()
            .with_base_url("http://localhost:9000")
            .with_timeout(Duration::from_secs(1));
        assert_eq!(client.base_url, "http://localhost:9000");
        assert_eq!(client.timeout, Duration::from_secs(1));
    }
}
