//! Native functions installed into a fresh [`Bindings`] before a script runs.
//!
//! Every builtin declares its parameter names up front and reads its
//! arguments back by those names. Argument kinds are checked on read and a
//! mismatch names the builtin, the parameter and the expected kind.
//!
//! Builtins that evaluate Seq items or call back into script functions do
//! so with their own argument frame hidden, so the script never sees the
//! builtin's parameter names.

use std::rc::Rc;

use wander_types::{
    write, Bindings, Element, EvalError, EvalResult, Graph, Identifier, NativeFunction, Statement,
    Value,
};

use crate::dataset::Dataset;
use crate::evaluator::{call_function, eval};
use crate::sink::LogSink;

/// Bindings with the common library and, if given, the dataset builtins.
pub fn standard_bindings(sink: Rc<dyn LogSink>, dataset: Option<Rc<dyn Dataset>>) -> Bindings {
    let mut bindings = Bindings::new();
    install_standard(&mut bindings, sink, dataset);
    bindings
}

/// Install the common library and, if given, the dataset builtins.
pub fn install_standard(
    bindings: &mut Bindings,
    sink: Rc<dyn LogSink>,
    dataset: Option<Rc<dyn Dataset>>,
) {
    common_bindings(bindings, sink);
    if let Some(dataset) = dataset {
        dataset_bindings(bindings, dataset);
    }
}

fn native<F>(bindings: &mut Bindings, name: &str, parameters: &[&str], body: F)
where
    F: Fn(&mut Bindings) -> EvalResult<Element> + 'static,
{
    bindings.bind(
        name,
        Element::Native(NativeFunction::new(parameters.iter().copied(), body)),
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Common library
// ══════════════════════════════════════════════════════════════════════════════

/// Install `log`, `ensure`, `not`, `and`, `or`, `each`, `filter`, `map`,
/// `graph` and `add`.
pub fn common_bindings(bindings: &mut Bindings, sink: Rc<dyn LogSink>) {
    native(bindings, "log", &["message"], move |b| {
        let message = b.read("message")?;
        sink.log(&write(&message));
        Ok(Element::Nothing)
    });

    native(bindings, "ensure", &["arg"], |b| match b.read("arg")? {
        Element::BooleanLiteral(true) => Ok(Element::Nothing),
        _ => Err(EvalError::EnsureFailed),
    });

    native(bindings, "not", &["bool"], |b| {
        Ok(Element::BooleanLiteral(!bool_arg(b, "not", "bool")?))
    });

    native(bindings, "and", &["boolLeft", "boolRight"], |b| {
        let left = bool_arg(b, "and", "boolLeft")?;
        let right = bool_arg(b, "and", "boolRight")?;
        Ok(Element::BooleanLiteral(left && right))
    });

    native(bindings, "or", &["boolLeft", "boolRight"], |b| {
        let left = bool_arg(b, "or", "boolLeft")?;
        let right = bool_arg(b, "or", "boolRight")?;
        Ok(Element::BooleanLiteral(left || right))
    });

    native(bindings, "each", &["seq", "fn"], |b| {
        let items = seq_arg(b, "each", "seq")?;
        let function = function_arg(b, "each", "fn")?;
        b.in_enclosing_scope(|b| -> EvalResult<Element> {
            for item in &items {
                let value = eval(item, b)?;
                call_function("fn", &function, vec![value], b)?;
            }
            Ok(Element::Nothing)
        })
    });

    native(bindings, "filter", &["seq", "fn"], |b| {
        let items = seq_arg(b, "filter", "seq")?;
        let function = function_arg(b, "filter", "fn")?;
        b.in_enclosing_scope(|b| -> EvalResult<Element> {
            let mut kept = Vec::new();
            for item in items {
                let value = eval(&item, b)?;
                if call_function("fn", &function, vec![value], b)? == Element::BooleanLiteral(true) {
                    kept.push(item);
                }
            }
            Ok(Element::Seq(kept))
        })
    });

    native(bindings, "map", &["seq", "fn"], |b| {
        let items = seq_arg(b, "map", "seq")?;
        let function = function_arg(b, "map", "fn")?;
        b.in_enclosing_scope(|b| -> EvalResult<Element> {
            let mut mapped = Vec::with_capacity(items.len());
            for item in &items {
                let value = eval(item, b)?;
                mapped.push(call_function("fn", &function, vec![value], b)?);
            }
            Ok(Element::Seq(mapped))
        })
    });

    native(bindings, "graph", &[], |_| Ok(Element::Graph(Graph::new())));

    native(bindings, "add", &["graph", "statement"], |b| {
        let graph = graph_arg(b, "add", "graph")?;
        let statement = statement_arg(b, "add", "statement")?;
        graph.add(statement);
        Ok(Element::Graph(graph))
    });
}

// ══════════════════════════════════════════════════════════════════════════════
// Dataset library
// ══════════════════════════════════════════════════════════════════════════════

/// Install `datasetName`, `datasetStatements` and `datasetAdd` backed by
/// `dataset`.
pub fn dataset_bindings(bindings: &mut Bindings, dataset: Rc<dyn Dataset>) {
    let source = Rc::clone(&dataset);
    native(bindings, "datasetName", &[], move |_| {
        Ok(Element::StringLiteral(source.name().to_string()))
    });

    let source = Rc::clone(&dataset);
    native(bindings, "datasetStatements", &[], move |_| {
        Ok(Element::Graph(source.statements().into_iter().collect()))
    });

    native(bindings, "datasetAdd", &["statement"], move |b| {
        let statement = statement_arg(b, "datasetAdd", "statement")?;
        Ok(Element::BooleanLiteral(dataset.add(statement)))
    });
}

// ══════════════════════════════════════════════════════════════════════════════
// Argument readers
// ══════════════════════════════════════════════════════════════════════════════

fn bool_arg(b: &Bindings, function: &str, parameter: &str) -> EvalResult<bool> {
    match b.read(parameter)? {
        Element::BooleanLiteral(value) => Ok(value),
        other => Err(EvalError::wrong_kind(function, parameter, "Boolean", other.kind_name())),
    }
}

fn seq_arg(b: &Bindings, function: &str, parameter: &str) -> EvalResult<Vec<Element>> {
    match b.read(parameter)? {
        Element::Seq(items) => Ok(items),
        other => Err(EvalError::wrong_kind(function, parameter, "Seq", other.kind_name())),
    }
}

fn graph_arg(b: &Bindings, function: &str, parameter: &str) -> EvalResult<Graph> {
    match b.read(parameter)? {
        Element::Graph(graph) => Ok(graph),
        other => Err(EvalError::wrong_kind(function, parameter, "Graph", other.kind_name())),
    }
}

/// A function of exactly one parameter.
fn function_arg(b: &Bindings, function: &str, parameter: &str) -> EvalResult<Element> {
    let value = b.read(parameter)?;
    match value.parameters().map(<[String]>::len) {
        Some(1) => Ok(value),
        Some(n) => Err(EvalError::wrong_kind(
            function,
            parameter,
            "single-parameter Function",
            format!("Function of {n} parameters"),
        )),
        None => Err(EvalError::wrong_kind(
            function,
            parameter,
            "single-parameter Function",
            value.kind_name(),
        )),
    }
}

/// A `[entity, attribute, value]` Seq, components evaluated, as a Statement.
fn statement_arg(b: &mut Bindings, function: &str, parameter: &str) -> EvalResult<Statement> {
    let parts = seq_arg(b, function, parameter)?;
    let [entity, attribute, value]: [Element; 3] = parts.try_into().map_err(|parts: Vec<Element>| {
        EvalError::invalid_statement(format!(
            "a statement needs exactly 3 elements, found {}",
            parts.len()
        ))
    })?;
    let (entity, attribute, value) = b.in_enclosing_scope(|b| -> EvalResult<_> {
        Ok((eval(&entity, b)?, eval(&attribute, b)?, eval(&value, b)?))
    })?;
    Ok(Statement::new(
        identifier_part(entity, "entity")?,
        identifier_part(attribute, "attribute")?,
        value_part(value)?,
    ))
}

fn identifier_part(element: Element, position: &str) -> EvalResult<Identifier> {
    match element {
        Element::IdentifierLiteral(id) => Ok(id),
        other => Err(EvalError::invalid_statement(format!(
            "the {position} must be an Identifier, found {}",
            other.kind_name()
        ))),
    }
}

fn value_part(element: Element) -> EvalResult<Value> {
    match element {
        Element::IdentifierLiteral(id) => Ok(Value::Identifier(id)),
        Element::StringLiteral(s) => Ok(Value::String(s)),
        Element::IntegerLiteral(i) => Ok(Value::Integer(i)),
        other => Err(EvalError::invalid_statement(format!(
            "{} is not a valid statement value",
            other.kind_name()
        ))),
    }
}
