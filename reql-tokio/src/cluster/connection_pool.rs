#[cfg(test)]
use mockall::*;
#[cfg(test)]
use serde_json::Value;

use reql_protocol::host::Host;
use reql_protocol::query::Query;
use reql_protocol::server::ServerResponse;

use crate::error::Result;
use crate::future::BoxFuture;

/// Pool of connections to a single server. Nodes own exactly one pool and delegate all I/O to it.
/// Pools are responsible for dialing, health checks and capacity limits; errors returned from a
/// pool are passed to the caller unchanged.
pub trait ConnectionPool: Send + Sync {
    /// Stream of results returned from a query.
    type Cursor: Send;

    /// Runs given query and returns a cursor over its results.
    fn query(&self, query: Query) -> BoxFuture<Result<Self::Cursor>>;

    /// Runs given query discarding any results.
    fn exec(&self, query: Query) -> BoxFuture<Result<()>>;

    /// Returns the name and id of the server connections are attached to.
    fn server(&self) -> BoxFuture<Result<ServerResponse>>;

    /// Closes all connections. Subsequent calls should fail.
    fn close(&self) -> BoxFuture<Result<()>>;

    /// Sets the maximum number of idle connections kept in the pool.
    fn set_max_idle_connections(&self, max_idle: usize);

    /// Sets the maximum number of open connections to the server.
    fn set_max_open_connections(&self, max_open: usize);
}

#[cfg(test)]
mock! {
    pub ConnectionPool {
    }

    impl ConnectionPool for ConnectionPool {
        type Cursor = Vec<Value>;

        fn query<'a>(&'a self, query: Query) -> BoxFuture<'a, Result<Vec<Value>>>;

        fn exec<'a>(&'a self, query: Query) -> BoxFuture<'a, Result<()>>;

        fn server<'a>(&'a self) -> BoxFuture<'a, Result<ServerResponse>>;

        fn close<'a>(&'a self) -> BoxFuture<'a, Result<()>>;

        fn set_max_idle_connections(&self, max_idle: usize);

        fn set_max_open_connections(&self, max_open: usize);
    }
}

/// Creates connection pools for newly discovered servers.
pub trait ConnectionPoolFactory: Send + Sync {
    type Pool: ConnectionPool;

    /// Creates a new pool with connections to given host.
    fn create(&self, host: Host) -> BoxFuture<Result<Self::Pool>>;
}

#[cfg(test)]
mock! {
    pub ConnectionPoolFactory {
    }

    impl ConnectionPoolFactory for ConnectionPoolFactory {
        type Pool = MockConnectionPool;

        fn create<'a>(&'a self, host: Host) -> BoxFuture<'a, Result<MockConnectionPool>>;
    }
}

/// Connection limits applied to pools of newly created nodes. By default, a single connection is
/// kept open and idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionPoolConfig {
    max_idle: usize,
    max_open: usize,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        ConnectionPoolConfig {
            max_idle: 1,
            max_open: 1,
        }
    }
}

impl ConnectionPoolConfig {
    /// Creates a new configuration with given connection limits.
    pub fn new(max_idle: usize, max_open: usize) -> Self {
        assert!(max_open > 0);
        ConnectionPoolConfig { max_idle, max_open }
    }

    #[must_use]
    pub fn with_max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    #[must_use]
    pub fn with_max_open(mut self, max_open: usize) -> Self {
        assert!(max_open > 0);
        self.max_open = max_open;
        self
    }

    #[inline]
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    #[inline]
    pub fn max_open(&self) -> usize {
        self.max_open
    }
}
