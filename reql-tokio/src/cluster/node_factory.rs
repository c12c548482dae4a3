use derivative::Derivative;
use reql_protocol::status::{NodeInfo, NodeStatus};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tracing::*;

use crate::cluster::{
    ConnectionPoolConfig, ConnectionPoolFactory, HealthFeedback, Node, NodeEvent,
};
use crate::error::Result;

/// Creates nodes for servers found during cluster discovery, each with a new connection pool to
/// the server's primary address.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct NodeFactory<F: ConnectionPoolFactory> {
    #[derivative(Debug = "ignore")]
    pool_factory: F,
    config: ConnectionPoolConfig,
    #[derivative(Debug = "ignore")]
    event_sender: Option<Sender<NodeEvent>>,
}

impl<F: ConnectionPoolFactory> NodeFactory<F> {
    pub fn new(pool_factory: F, config: ConnectionPoolConfig) -> Self {
        NodeFactory {
            pool_factory,
            config,
            event_sender: None,
        }
    }

    /// Sets a channel which receives lifecycle events of all created nodes.
    #[must_use]
    pub fn with_event_sender(mut self, event_sender: Sender<NodeEvent>) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    #[inline]
    pub fn config(&self) -> &ConnectionPoolConfig {
        &self.config
    }

    /// Creates a node described by a server status document. Addresses are validated before any
    /// connection is made.
    pub async fn create_node(
        &self,
        status: &NodeStatus,
        health_feedback: Arc<dyn HealthFeedback + Send + Sync>,
    ) -> Result<Node<F::Pool>> {
        let node_info = status.node_info()?;
        if !status.is_connected() {
            debug!(id = %status.id, status = %status.status, "Server is not connected.");
        }

        self.create_node_from_info(node_info, health_feedback).await
    }

    /// Creates a node for already decoded node info.
    pub async fn create_node_from_info(
        &self,
        node_info: NodeInfo,
        health_feedback: Arc<dyn HealthFeedback + Send + Sync>,
    ) -> Result<Node<F::Pool>> {
        debug!(%node_info, "Creating connection pool");

        let pool = self.pool_factory.create(node_info.host().clone()).await?;
        let node = Node::from_node_info(node_info, pool, health_feedback);
        let node = match &self.event_sender {
            Some(event_sender) => node.with_event_sender(event_sender.clone()),
            None => node,
        };

        node.set_max_idle_connections(self.config.max_idle()).await;
        node.set_max_open_connections(self.config.max_open()).await;

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;
    use mockall::predicate::*;
    use reql_protocol::host::Host;
    use serde_json::json;

    use super::*;
    use crate::cluster::connection_pool::{MockConnectionPool, MockConnectionPoolFactory};
    use crate::cluster::{CloseOptions, NoopHealthFeedback};
    use crate::error::Error;

    fn status(canonical_addresses: serde_json::Value) -> NodeStatus {
        NodeStatus::from_value(json!({
            "id": "s1",
            "name": "n1",
            "status": "connected",
            "network": {
                "hostname": "h",
                "cluster_port": 29015,
                "reql_port": 28015,
                "canonical_addresses": canonical_addresses
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn should_create_node_with_pool_on_primary_host() {
        let mut pool_factory = MockConnectionPoolFactory::new();
        pool_factory
            .expect_create()
            .withf(|host| host == &Host::new("10.0.0.1".into(), 28015))
            .times(1)
            .returning(|_| {
                let mut pool = MockConnectionPool::new();
                pool.expect_set_max_idle_connections()
                    .with(eq(2))
                    .times(1)
                    .return_const(());
                pool.expect_set_max_open_connections()
                    .with(eq(5))
                    .times(1)
                    .return_const(());
                pool.expect_close()
                    .times(1)
                    .returning(|| futures::future::ready(Ok(())).boxed());

                futures::future::ready(Ok(pool)).boxed()
            });

        let (event_sender, mut event_receiver) = tokio::sync::mpsc::channel(1);
        let factory = NodeFactory::new(pool_factory, ConnectionPoolConfig::new(2, 5))
            .with_event_sender(event_sender);

        let node = factory
            .create_node(
                &status(json!([
                    {"host": "10.0.0.1", "port": 28015},
                    {"host": "10.0.1.1", "port": 28015}
                ])),
                Arc::new(NoopHealthFeedback),
            )
            .await
            .unwrap();

        assert_eq!(node.id(), "s1");
        assert_eq!(node.aliases().len(), 2);
        assert_eq!(node.host().to_string(), "10.0.0.1:28015");

        node.close(CloseOptions::default()).await.unwrap();
        assert_eq!(
            event_receiver.recv().await,
            Some(NodeEvent::Closed { id: "s1".into() })
        );
    }

    #[tokio::test]
    async fn should_not_create_pool_without_addresses() {
        let mut pool_factory = MockConnectionPoolFactory::new();
        pool_factory.expect_create().never();

        let factory = NodeFactory::new(pool_factory, Default::default());
        let result = factory
            .create_node(&status(json!([])), Arc::new(NoopHealthFeedback))
            .await;

        assert!(matches!(result, Err(Error::NoAliases)));
    }

    #[tokio::test]
    async fn should_propagate_pool_creation_errors() {
        let mut pool_factory = MockConnectionPoolFactory::new();
        pool_factory.expect_create().times(1).returning(|_| {
            futures::future::ready(Err(Error::Timeout("connect".into()))).boxed()
        });

        let factory = NodeFactory::new(pool_factory, Default::default());
        let result = factory
            .create_node(
                &status(json!([{"host": "10.0.0.1", "port": 28015}])),
                Arc::new(NoopHealthFeedback),
            )
            .await;

        assert!(matches!(result, Err(Error::Timeout(_))));
    }
}
