//! **reql-tokio** is the node layer of an async RethinkDB cluster client written in Rust.
//!
//! ## Nodes
//!
//! A [`Node`](crate::cluster::Node) represents a single server in the cluster. It owns a
//! [`ConnectionPool`](crate::cluster::ConnectionPool) to that server and routes queries through
//! it. Nodes can be safely shared between tasks - any number of queries can run concurrently with
//! a [`close`](crate::cluster::Node::close). Once a node is closed, all further queries fail
//! immediately with [`Error::InvalidNode`](crate::error::Error::InvalidNode), which signals the
//! cluster to pick a different node.
//!
//! ## Discovery
//!
//! Servers are described by [`NodeStatus`](crate::status::NodeStatus) documents read from the
//! `server_status` system table. A [`NodeFactory`](crate::cluster::NodeFactory) turns them into
//! connected nodes, using a user supplied
//! [`ConnectionPoolFactory`](crate::cluster::ConnectionPoolFactory).
//!
//! ## Host selection
//!
//! Nodes report the outcome of every query to a
//! [`HealthFeedback`](crate::cluster::HealthFeedback) handle, which lets adaptive host selection
//! policies prefer healthy servers.

pub mod cluster;
pub mod future;

pub use reql_protocol::error;
pub use reql_protocol::host;
pub use reql_protocol::query;
pub use reql_protocol::server;
pub use reql_protocol::status;

pub type Error = error::Error;
pub type Result<T> = error::Result<T>;
