use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Name and id of the server a connection is attached to, as reported by the server itself. The
/// id is the same one found in the server's status document, so it can be compared directly with
/// the id of a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Constructor, Serialize, Deserialize)]
pub struct ServerResponse {
    pub id: String,
    pub name: String,
}
