use std::io;
use std::result;
use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

/// ReQL driver error type. Errors come from two places - the node layer itself (such as using a
/// node which has already been closed) and connection pools, which report IO, protocol and server
/// failures. The node layer never reinterprets pool errors and forwards them as they are.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Internal IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// General error
    #[error("General error: {0}")]
    General(String),
    /// Node has been closed and can no longer be used. The cluster should pick another node.
    #[error("Invalid node: node has been closed")]
    InvalidNode,
    /// A node needs at least one address it can be reached at.
    #[error("Node has no addresses")]
    NoAliases,
    /// Port reported by the server does not fit into a valid port number.
    #[error("Invalid port: {0}")]
    InvalidPort(i64),
    /// Malformed document received from the server.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Error returned by the server.
    #[error("Server error: {message}")]
    Server { message: String },
    /// Timed out waiting for an operation to complete.
    #[error("Timeout: {0}")]
    Timeout(String),
    /// The connection pool has been shut down.
    #[error("Connection pool is closed")]
    PoolClosed,
    /// Unknown query type opcode.
    #[error("Unknown query type: {0}")]
    UnknownQueryType(u8),
}

impl From<String> for Error {
    fn from(err: String) -> Error {
        Error::General(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Error {
        Error::General(err.to_string())
    }
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Error::Io(error) => Error::Io(io::Error::new(
                error.kind(),
                error
                    .get_ref()
                    .map(|error| error.to_string())
                    .unwrap_or_default(),
            )),
            Error::General(error) => Error::General(error.clone()),
            Error::InvalidNode => Error::InvalidNode,
            Error::NoAliases => Error::NoAliases,
            Error::InvalidPort(port) => Error::InvalidPort(*port),
            // serde_json errors can't be cloned, so keep the message only
            Error::Decode(error) => Error::General(format!("Decode error: {error}")),
            Error::Server { message } => Error::Server {
                message: message.clone(),
            },
            Error::Timeout(error) => Error::Timeout(error.clone()),
            Error::PoolClosed => Error::PoolClosed,
            Error::UnknownQueryType(value) => Error::UnknownQueryType(*value),
        }
    }
}
