use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};

/// Network address of a server, as a host name (or IP) and a port. Displayed as `host:port`.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Constructor, Display, Serialize, Deserialize,
)]
#[display("{name}:{port}")]
pub struct Host {
    pub name: String,
    pub port: u16,
}

impl Host {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }
}
