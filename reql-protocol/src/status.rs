//! Server status documents, as found in the `rethinkdb.server_status` system table. The cluster
//! uses them to discover servers and the addresses they can be reached at.
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::host::Host;

const CONNECTED_STATUS: &str = "connected";

/// Status of a single server in the cluster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub id: String,
    pub name: String,
    pub status: String,
    pub network: NodeNetwork,
}

/// Network part of the server status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeNetwork {
    pub hostname: String,
    pub cluster_port: i64,
    pub reql_port: i64,
    pub canonical_addresses: Vec<CanonicalAddress>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalAddress {
    pub host: String,
    pub port: i64,
}

impl CanonicalAddress {
    fn to_host(&self) -> Result<Host> {
        u16::try_from(self.port)
            .map(|port| Host::new(self.host.clone(), port))
            .map_err(|_| Error::InvalidPort(self.port))
    }
}

impl NodeStatus {
    pub fn from_json(document: &str) -> Result<Self> {
        serde_json::from_str(document).map_err(Into::into)
    }

    pub fn from_value(document: Value) -> Result<Self> {
        serde_json::from_value(document).map_err(Into::into)
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.status == CONNECTED_STATUS
    }

    /// Addresses the server can be reached at, in the order reported by the server.
    pub fn aliases(&self) -> Result<Vec<Host>> {
        self.network
            .canonical_addresses
            .iter()
            .map(CanonicalAddress::to_host)
            .try_collect()
    }

    /// Creates node construction input from this status.
    pub fn node_info(&self) -> Result<NodeInfo> {
        NodeInfo::new(self.id.clone(), self.aliases()?)
    }
}

/// Identity and addresses of a node to create. Always contains at least one alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    id: String,
    aliases: Vec<Host>,
}

impl NodeInfo {
    pub fn new(id: String, aliases: Vec<Host>) -> Result<Self> {
        if aliases.is_empty() {
            return Err(Error::NoAliases);
        }

        Ok(NodeInfo { id, aliases })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.aliases[0]
    }

    #[inline]
    pub fn aliases(&self) -> &[Host] {
        &self.aliases
    }

    pub fn into_parts(self) -> (String, Vec<Host>) {
        (self.id, self.aliases)
    }
}

impl Display for NodeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.id, self.aliases.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn status_document() -> Value {
        json!({
            "id": "s1",
            "name": "n1",
            "status": "ok",
            "network": {
                "hostname": "h",
                "cluster_port": 29015,
                "reql_port": 28015,
                "canonical_addresses": [{"host": "10.0.0.1", "port": 28015}]
            }
        })
    }

    #[test]
    fn should_decode_status_into_node_info() {
        let status = NodeStatus::from_value(status_document()).unwrap();
        assert_eq!(status.network.cluster_port, 29015);
        assert_eq!(status.network.reql_port, 28015);
        assert!(!status.is_connected());

        let node_info = status.node_info().unwrap();
        assert_eq!(node_info.id(), "s1");
        assert_eq!(
            node_info
                .aliases()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["10.0.0.1:28015"]
        );
        assert_eq!(node_info.host(), &node_info.aliases()[0]);
    }

    #[test]
    fn should_keep_address_order() {
        let status = NodeStatus::from_json(
            r#"{"id": "s2", "name": "n2", "status": "connected", "network": {
                "hostname": "h2", "cluster_port": 29015, "reql_port": 28015,
                "canonical_addresses": [
                    {"host": "10.0.0.2", "port": 28015},
                    {"host": "192.168.1.2", "port": 28016}
                ]}}"#,
        )
        .unwrap();

        assert!(status.is_connected());
        assert_eq!(
            status.node_info().unwrap().to_string(),
            "s2 [10.0.0.2:28015, 192.168.1.2:28016]"
        );
    }

    #[test]
    fn should_fail_on_missing_fields() {
        let mut document = status_document();
        document["network"]
            .as_object_mut()
            .unwrap()
            .remove("canonical_addresses");

        assert!(matches!(
            NodeStatus::from_value(document),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            NodeStatus::from_json("{\"id\": 1}"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn should_not_create_node_info_without_addresses() {
        let mut document = status_document();
        document["network"]["canonical_addresses"] = json!([]);

        let status = NodeStatus::from_value(document).unwrap();
        assert!(matches!(status.node_info(), Err(Error::NoAliases)));
    }

    #[test]
    fn should_reject_invalid_port() {
        let mut document = status_document();
        document["network"]["canonical_addresses"] = json!([{"host": "h", "port": 70000}]);

        let status = NodeStatus::from_value(document).unwrap();
        assert!(matches!(status.node_info(), Err(Error::InvalidPort(70000))));
    }
}
