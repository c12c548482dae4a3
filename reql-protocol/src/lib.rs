//! Data types of the ReQL client protocol that do not depend on any particular transport:
//! query opcodes and messages, server addresses, server info responses and the `server_status`
//! documents used to discover cluster members. All fallible operations share one [`Error`] type.

pub mod error;
pub mod host;
pub mod query;
pub mod server;
pub mod status;

pub type Error = error::Error;
pub type Result<T> = error::Result<T>;
