//! ReQL queries as seen by connection pools. Term construction is left to higher layers - a query
//! only carries an already built term.
use derive_more::Display;
use fxhash::FxHashMap;
use serde_json::{Map, Value};

use crate::error;

/// Query type opcodes sent to the server.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Ord, PartialOrd, Display)]
pub enum QueryType {
    Start,
    Continue,
    Stop,
    NoreplyWait,
    ServerInfo,
}

impl From<QueryType> for u8 {
    fn from(value: QueryType) -> Self {
        match value {
            QueryType::Start => 1,
            QueryType::Continue => 2,
            QueryType::Stop => 3,
            QueryType::NoreplyWait => 4,
            QueryType::ServerInfo => 5,
        }
    }
}

impl TryFrom<u8> for QueryType {
    type Error = error::Error;

    fn try_from(value: u8) -> Result<Self, <QueryType as TryFrom<u8>>::Error> {
        match value {
            1 => Ok(QueryType::Start),
            2 => Ok(QueryType::Continue),
            3 => Ok(QueryType::Stop),
            4 => Ok(QueryType::NoreplyWait),
            5 => Ok(QueryType::ServerInfo),
            _ => Err(error::Error::UnknownQueryType(value)),
        }
    }
}

/// A single query to be run by a connection pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub query_type: QueryType,
    /// Token used to match responses to queries. Assigned by the connection which sends the query.
    pub token: u64,
    pub term: Option<Value>,
    pub opts: FxHashMap<String, Value>,
}

impl Query {
    /// Creates a new query of given type without a term.
    pub fn new(query_type: QueryType) -> Self {
        Query {
            query_type,
            token: 0,
            term: None,
            opts: Default::default(),
        }
    }

    /// Starts evaluating given term.
    pub fn start(term: Value) -> Self {
        Query {
            term: Some(term),
            ..Query::new(QueryType::Start)
        }
    }

    /// Barrier which completes when all previous noreply queries on a connection have been
    /// processed by the server.
    pub fn noreply_wait() -> Self {
        Query::new(QueryType::NoreplyWait)
    }

    /// Asks for the name and id of the server a connection is attached to.
    pub fn server_info() -> Self {
        Query::new(QueryType::ServerInfo)
    }

    #[must_use]
    pub fn with_token(mut self, token: u64) -> Self {
        self.token = token;
        self
    }

    #[must_use]
    pub fn with_opt(mut self, name: impl Into<String>, value: Value) -> Self {
        self.opts.insert(name.into(), value);
        self
    }

    /// Checks if the `noreply` option is set, i.e. the server won't send a response.
    pub fn is_noreply(&self) -> bool {
        self.opts
            .get("noreply")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Builds the JSON message sent for this query: `[type, term, opts]` when a term is present,
    /// `[type]` otherwise.
    pub fn to_message(&self) -> Value {
        let query_type = Value::from(u8::from(self.query_type));

        match &self.term {
            Some(term) => {
                let opts: Map<String, Value> = self
                    .opts
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect();

                Value::Array(vec![query_type, term.clone(), Value::Object(opts)])
            }
            None => Value::Array(vec![query_type]),
        }
    }
}
