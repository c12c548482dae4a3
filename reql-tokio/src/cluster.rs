pub use crate::cluster::close_options::CloseOptions;
pub use crate::cluster::connection_pool::{
    ConnectionPool, ConnectionPoolConfig, ConnectionPoolFactory,
};
pub use crate::cluster::health::{HealthFeedback, NoopHealthFeedback};
pub use crate::cluster::node::Node;
pub use crate::cluster::node_event::NodeEvent;
pub use crate::cluster::node_factory::NodeFactory;

mod close_options;
mod connection_pool;
mod health;
mod node;
mod node_event;
mod node_factory;
