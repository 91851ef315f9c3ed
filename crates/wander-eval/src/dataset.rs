//! The dataset capability scripts can be run against.
//!
//! Storage, persistence and transactions belong to the host; a script only
//! sees a named collection of statements it can read and extend.

use wander_types::{Graph, Statement};

/// A named statement store supplied by the host.
pub trait Dataset {
    fn name(&self) -> &str;

    /// Snapshot of the current statements.
    fn statements(&self) -> Vec<Statement>;

    /// Insert a statement. Returns `false` if it was already present.
    fn add(&self, statement: Statement) -> bool;
}

/// A dataset held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    name: String,
    graph: Graph,
}

impl InMemoryDataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: Graph::new(),
        }
    }

    /// Create a dataset pre-filled with `statements`.
    pub fn with_statements(
        name: impl Into<String>,
        statements: impl IntoIterator<Item = Statement>,
    ) -> Self {
        Self {
            name: name.into(),
            graph: statements.into_iter().collect(),
        }
    }
}

impl Dataset for InMemoryDataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn statements(&self) -> Vec<Statement> {
        self.graph.statements()
    }

    fn add(&self, statement: Statement) -> bool {
        self.graph.add(statement)
    }
}
