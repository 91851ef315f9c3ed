//! The triple-store value model: identifiers, statements and graphs.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::error::InvalidIdentifier;

/// Returns `true` for characters allowed between `<` and `>`.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.'
                | '_'
                | '~'
                | ':'
                | '/'
                | '?'
                | '#'
                | '['
                | ']'
                | '@'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '%'
                | '='
        )
}

// ══════════════════════════════════════════════════════════════════════════════
// Identifier
// ══════════════════════════════════════════════════════════════════════════════

/// An IRI-like atomic name, written `<...>` in source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap identifier text (without the angle brackets).
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidIdentifier> {
        let name = name.into();
        if !name.is_empty() && name.chars().all(is_identifier_char) {
            Ok(Self(name))
        } else {
            Err(InvalidIdentifier(name))
        }
    }

    /// The identifier text without angle brackets.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = InvalidIdentifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Identifier::new(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statement
// ══════════════════════════════════════════════════════════════════════════════

/// The value position of a statement.
///
/// Booleans, sequences, graphs and `nothing` are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Identifier(Identifier),
    String(String),
    Integer(i64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Identifier(id) => write!(f, "{id}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// An entity/attribute/value triple, the atomic fact of the data model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub entity: Identifier,
    pub attribute: Identifier,
    pub value: Value,
}

impl Statement {
    pub fn new(entity: Identifier, attribute: Identifier, value: Value) -> Self {
        Self {
            entity,
            attribute,
            value,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.entity, self.attribute, self.value)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Graph
// ══════════════════════════════════════════════════════════════════════════════

/// A shared, mutable set of statements.
///
/// Cloning a `Graph` clones the handle, not the statements: every clone
/// observes mutations made through any other. Equality compares contents.
#[derive(Clone, Default)]
pub struct Graph {
    statements: Rc<RefCell<BTreeSet<Statement>>>,
}

impl Graph {
    /// Create a fresh, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a statement. Returns `false` if it was already present.
    pub fn add(&self, statement: Statement) -> bool {
        self.statements.borrow_mut().insert(statement)
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.statements.borrow().contains(statement)
    }

    pub fn len(&self) -> usize {
        self.statements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.borrow().is_empty()
    }

    /// Snapshot of the current statements, in sorted order.
    pub fn statements(&self) -> Vec<Statement> {
        self.statements.borrow().iter().cloned().collect()
    }

    /// Returns `true` if both handles refer to the same underlying graph.
    pub fn ptr_eq(&self, other: &Graph) -> bool {
        Rc::ptr_eq(&self.statements, &other.statements)
    }
}

impl FromIterator<Statement> for Graph {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        Self {
            statements: Rc::new(RefCell::new(iter.into_iter().collect())),
        }
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.statements.borrow() == *other.statements.borrow()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.statements.borrow().iter()).finish()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .statements
            .borrow()
            .iter()
            .map(|s| s.to_string())
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}
