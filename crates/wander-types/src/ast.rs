//! The Element tree: syntax and runtime values in one closed sum type.
//!
//! The parser produces Elements, the evaluator consumes and returns them.
//! Literal variants, `Seq`, `Nothing` and `Graph` are values; the function
//! variants are values too but cannot be stored in a statement.

use std::fmt;
use std::rc::Rc;

use crate::bindings::Bindings;
use crate::error::EvalResult;
use crate::graph::{Graph, Identifier};

/// A parsed script: the top-level elements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub elements: Vec<Element>,
}

/// A node of the Wander AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    // ── Literal values ──
    BooleanLiteral(bool),
    StringLiteral(String),
    IntegerLiteral(i64),
    IdentifierLiteral(Identifier),

    /// Unresolved variable reference.
    Name(String),

    // ── Syntax ──
    LetStatement(LetStatement),
    /// `{ ... }` block; its value is the value of its last element.
    Scope(Vec<Element>),
    FunctionCall(FunctionCall),
    IfExpression(IfExpression),

    // ── Compound values ──
    /// Ordered, lazily evaluated sequence.
    Seq(Vec<Element>),
    /// The unit value.
    Nothing,
    Graph(Graph),

    // ── Functions ──
    Lambda(Lambda),
    Native(NativeFunction),
}

/// `let name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub name: String,
    pub value: Box<Element>,
}

/// `name(arg arg ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<Element>,
}

/// One condition → body pair of an if chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Element,
    pub body: Element,
}

/// `if c b else if c b ... else b`
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub if_conditional: Box<Conditional>,
    pub else_ifs: Vec<Conditional>,
    pub else_body: Option<Box<Element>>,
}

/// A user-defined function: `(a b) -> { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub parameters: Vec<String>,
    pub body: Vec<Element>,
}

/// Host callback backing a native function.
///
/// The callback runs with its arguments already bound by parameter name
/// in the innermost frame of the Bindings it receives.
pub type NativeBody = Rc<dyn Fn(&mut Bindings) -> EvalResult<Element>>;

/// A builtin whose body is a host callback.
#[derive(Clone)]
pub struct NativeFunction {
    pub parameters: Vec<String>,
    body: NativeBody,
}

impl NativeFunction {
    pub fn new<P, F>(parameters: P, body: F) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        F: Fn(&mut Bindings) -> EvalResult<Element> + 'static,
    {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
            body: Rc::new(body),
        }
    }

    /// Invoke the callback. Arguments must already be bound.
    pub fn call(&self, bindings: &mut Bindings) -> EvalResult<Element> {
        (self.body)(bindings)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters && Rc::ptr_eq(&self.body, &other.body)
    }
}

impl Element {
    /// Human-readable kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::BooleanLiteral(_) => "Boolean",
            Element::StringLiteral(_) => "String",
            Element::IntegerLiteral(_) => "Integer",
            Element::IdentifierLiteral(_) => "Identifier",
            Element::Name(_) => "Name",
            Element::LetStatement(_) => "LetStatement",
            Element::Scope(_) => "Scope",
            Element::FunctionCall(_) => "FunctionCall",
            Element::IfExpression(_) => "IfExpression",
            Element::Seq(_) => "Seq",
            Element::Nothing => "Nothing",
            Element::Graph(_) => "Graph",
            Element::Lambda(_) | Element::Native(_) => "Function",
        }
    }

    /// Returns `true` for variants that evaluate to themselves.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Element::BooleanLiteral(_)
                | Element::StringLiteral(_)
                | Element::IntegerLiteral(_)
                | Element::IdentifierLiteral(_)
                | Element::Seq(_)
                | Element::Nothing
                | Element::Graph(_)
        )
    }

    /// Declared parameter names, for the two function variants.
    pub fn parameters(&self) -> Option<&[String]> {
        match self {
            Element::Lambda(lambda) => Some(&lambda.parameters),
            Element::Native(native) => Some(&native.parameters),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::BooleanLiteral(b) => write!(f, "{b}"),
            Element::StringLiteral(s) => f.write_str(s),
            Element::IntegerLiteral(i) => write!(f, "{i}"),
            Element::IdentifierLiteral(id) => write!(f, "{id}"),
            Element::Name(name) => f.write_str(name),
            Element::LetStatement(_) => f.write_str("[let statement]"),
            Element::Scope(_) => f.write_str("[scope]"),
            Element::FunctionCall(_) => f.write_str("[function call]"),
            Element::IfExpression(_) => f.write_str("[if expression]"),
            Element::Seq(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Element::Nothing => f.write_str("nothing"),
            Element::Graph(graph) => write!(f, "{graph}"),
            Element::Lambda(_) => f.write_str("[lambda definition]"),
            Element::Native(_) => f.write_str("[native function]"),
        }
    }
}

/// Render any element as text.
pub fn write(element: &Element) -> String {
    element.to_string()
}
