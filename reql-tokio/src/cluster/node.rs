use derivative::Derivative;
use reql_protocol::host::Host;
use reql_protocol::query::Query;
use reql_protocol::server::ServerResponse;
use reql_protocol::status::NodeInfo;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::RwLock;
use tracing::*;

use crate::cluster::{CloseOptions, ConnectionPool, HealthFeedback, NodeEvent};
use crate::error::{Error, Result};

/// A single server in the cluster, along with a pool of connections to it.
///
/// A node starts open and can be closed exactly once. Closed nodes reject all queries with
/// [`Error::InvalidNode`] without touching the pool, so the cluster can pick another node. A node
/// is never reopened - a new one should be created instead.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Node<P: ConnectionPool> {
    id: String,
    aliases: Vec<Host>,
    #[derivative(Debug = "ignore")]
    health_feedback: Arc<dyn HealthFeedback + Send + Sync>,
    #[derivative(Debug = "ignore")]
    event_sender: Option<Sender<NodeEvent>>,
    // `None` once the node is closed; pool and closed state must always change together
    #[derivative(Debug = "ignore")]
    pool: RwLock<Option<Arc<P>>>,
}

impl<P: ConnectionPool> Node<P> {
    /// Creates a new open node. The first alias becomes the primary host.
    pub fn new(
        id: String,
        aliases: Vec<Host>,
        pool: P,
        health_feedback: Arc<dyn HealthFeedback + Send + Sync>,
    ) -> Result<Self> {
        if aliases.is_empty() {
            return Err(Error::NoAliases);
        }

        Ok(Node {
            id,
            aliases,
            health_feedback,
            event_sender: None,
            pool: RwLock::new(Some(Arc::new(pool))),
        })
    }

    /// Creates a new open node from already validated node info.
    pub fn from_node_info(
        node_info: NodeInfo,
        pool: P,
        health_feedback: Arc<dyn HealthFeedback + Send + Sync>,
    ) -> Self {
        let (id, aliases) = node_info.into_parts();
        Node {
            id,
            aliases,
            health_feedback,
            event_sender: None,
            pool: RwLock::new(Some(Arc::new(pool))),
        }
    }

    /// Sets a channel which receives lifecycle events of this node.
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: Sender<NodeEvent>) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Cluster-assigned identifier of the server.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Primary address of the server.
    #[inline]
    pub fn host(&self) -> &Host {
        &self.aliases[0]
    }

    /// All addresses the server can be reached at, in priority order.
    #[inline]
    pub fn aliases(&self) -> &[Host] {
        &self.aliases
    }

    #[inline]
    pub fn health_feedback(&self) -> &Arc<dyn HealthFeedback + Send + Sync> {
        &self.health_feedback
    }

    pub async fn is_closed(&self) -> bool {
        self.pool.read().await.is_none()
    }

    /// Closes the node along with its connection pool. Closing an already closed node does
    /// nothing. When `noreply_wait` is requested, waits for outstanding noreply queries before
    /// closing connections; a failed wait does not prevent closing.
    pub async fn close(&self, options: CloseOptions) -> Result<()> {
        if self.is_closed().await {
            return Ok(());
        }

        let mut pool = self.pool.write().await;

        if options.noreply_wait {
            if let Some(current) = pool.as_ref() {
                if let Err(error) = Self::wait_for_noreply(current).await {
                    warn!(id = %self.id, %error, "Noreply wait failed when closing node.");
                }
            }
        }

        // the node counts as closed from here on, even if closing the pool gets cancelled
        let Some(current) = pool.take() else {
            // somebody closed the node in the meantime
            return Ok(());
        };

        debug!(id = %self.id, host = %self.host(), "Closing node.");
        self.send_event(NodeEvent::Closed {
            id: self.id.clone(),
        });

        if let Err(error) = current.close().await {
            warn!(id = %self.id, %error, "Error closing connection pool.");
        }

        Ok(())
    }

    /// Waits until all noreply queries sent through this node's connections have been processed
    /// by the server.
    pub async fn noreply_wait(&self) -> Result<()> {
        let pool = self.open_pool().await?;
        Self::wait_for_noreply(&pool).await
    }

    /// Runs a query using this node's connection pool.
    pub async fn query(&self, query: Query) -> Result<P::Cursor> {
        let pool = self.open_pool().await?;
        let result = pool.query(query).await;
        self.report_outcome(&result);
        result
    }

    /// Runs a query using this node's connection pool, discarding any results.
    pub async fn exec(&self, query: Query) -> Result<()> {
        let pool = self.open_pool().await?;
        let result = pool.exec(query).await;
        self.report_outcome(&result);
        result
    }

    /// Returns the name and id of the server connections are attached to.
    pub async fn server(&self) -> Result<ServerResponse> {
        let pool = self.open_pool().await?;
        pool.server().await
    }

    /// Sets the maximum number of idle connections in the pool.
    pub async fn set_max_idle_connections(&self, max_idle: usize) {
        match self.pool.read().await.as_ref() {
            Some(pool) => pool.set_max_idle_connections(max_idle),
            None => debug!(id = %self.id, "Ignoring idle connection limit for closed node."),
        }
    }

    /// Sets the maximum number of open connections to the server.
    pub async fn set_max_open_connections(&self, max_open: usize) {
        match self.pool.read().await.as_ref() {
            Some(pool) => pool.set_max_open_connections(max_open),
            None => debug!(id = %self.id, "Ignoring open connection limit for closed node."),
        }
    }

    // The returned pool is the one observed together with the open state; I/O happens after the
    // lock is released.
    async fn open_pool(&self) -> Result<Arc<P>> {
        self.pool
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(Error::InvalidNode)
    }

    async fn wait_for_noreply(pool: &P) -> Result<()> {
        pool.exec(Query::noreply_wait()).await
    }

    fn report_outcome<R>(&self, result: &Result<R>) {
        if result.is_ok() {
            self.health_feedback.report_success();
        } else {
            self.health_feedback.report_failure();
        }
    }

    fn send_event(&self, event: NodeEvent) {
        if let Some(event_sender) = &self.event_sender {
            if let Err(error) = event_sender.try_send(event) {
                debug!(id = %self.id, %error, "Cannot send node event.");
            }
        }
    }
}
