//! Backend error types

use std::net::SocketAddr;

/// Errors that stop the sign-up backend.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Could not bind the listening socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Accepting a connection failed.
    #[error("Accept failed: {0}")]
    Accept(#[source] std::io::Error),

    /// The bound socket has no usable local address.
    #[error("Failed to get local address: {0}")]
    LocalAddr(#[source] std::io::Error),
}
