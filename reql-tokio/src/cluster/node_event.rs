use derive_more::Display;

/// Lifecycle events sent from nodes to the owning cluster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum NodeEvent {
    /// The node has been closed and should be removed from the set of live nodes.
    #[display("Node {id} closed")]
    Closed { id: String },
}
